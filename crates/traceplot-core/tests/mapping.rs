// File: crates/traceplot-core/tests/mapping.rs
// Purpose: Data-to-screen mapping and axis spec validation.

use traceplot_core::{AxisMapper, AxisSpec, Orientation};

#[test]
fn forward_mapping_round_trips() {
    let m = AxisMapper::forward(0.0, 100.0, 10.0, 110.0).unwrap();
    assert_eq!(m.to_screen(0.0), 10.0);
    assert_eq!(m.to_screen(50.0), 60.0);
    assert_eq!(m.to_screen(100.0), 110.0);
    assert_eq!(m.from_screen(60.0), 50.0);
}

#[test]
fn value_axis_is_flipped_on_screen() {
    // Screen y grows downward; a bottom-to-top value axis maps zero to the
    // lower screen edge.
    let axis = AxisSpec::new(Orientation::VerticalUp, 0.0, 100.0, 30.0, 525.0, "Level").unwrap();
    let m = axis.mapper();
    assert!(m.flipped);
    assert_eq!(m.to_screen(0.0), 525.0);
    assert_eq!(m.to_screen(100.0), 30.0);
    assert_eq!(m.from_screen(525.0), 0.0);
}

#[test]
fn offset_shifts_the_data_origin() {
    let m = AxisMapper::forward(738000.0, 30.0, 125.0, 735.0).unwrap();
    assert_eq!(m.to_screen(738000.0), 125.0);
    assert_eq!(m.to_screen(738030.0), 735.0);
}

#[test]
fn degenerate_axes_are_rejected() {
    assert!(AxisMapper::forward(0.0, 0.0, 0.0, 100.0).is_err());
    assert!(AxisMapper::forward(0.0, -5.0, 0.0, 100.0).is_err());
    assert!(AxisMapper::inverted(0.0, 10.0, 50.0, 50.0).is_err());
    assert!(AxisSpec::new(Orientation::VerticalUp, 5.0, 5.0, 0.0, 100.0, "y").is_err());
    assert!(AxisSpec::new(Orientation::VerticalUp, f64::NAN, 1.0, 0.0, 100.0, "y").is_err());
}

#[test]
fn orientation_flips_only_against_screen_direction() {
    assert!(Orientation::VerticalUp.flipped());
    assert!(Orientation::HorizontalLeft.flipped());
    assert!(!Orientation::HorizontalRight.flipped());
    assert!(!Orientation::VerticalDown.flipped());
}
