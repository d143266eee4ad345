// File: crates/traceplot-core/tests/traces.rs
// Purpose: Gap detection and clipping behavior of trace drawing, checked
// against rendered pixels.

use skia_safe as skia;
use traceplot_core::trace::{draw_gap_trace, draw_route_trace};
use traceplot_core::{AxisMapper, SitePoint, TraceStyle};

fn style() -> TraceStyle {
    TraceStyle {
        color: skia::Color::BLACK,
        stroke_width: 2.0,
        dash: None,
        symbol: None,
    }
}

fn render(draw: impl FnOnce(&skia::Canvas)) -> (Vec<u8>, usize) {
    let mut surface = skia::surfaces::raster_n32_premul((100, 100)).unwrap();
    let canvas = surface.canvas();
    canvas.clear(skia::Color::WHITE);
    draw(canvas);

    let image = surface.image_snapshot();
    let info = skia::ImageInfo::new((100, 100), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let mut pixels = vec![0u8; 100 * 100 * 4];
    assert!(image.read_pixels(&info, &mut pixels, 400, (0, 0), skia::image::CachingHint::Allow));
    (pixels, 400)
}

fn is_dark(pixels: &[u8], stride: usize, x: usize, y: usize) -> bool {
    let p = y * stride + x * 4;
    pixels[p] < 128 && pixels[p + 1] < 128 && pixels[p + 2] < 128
}

#[test]
fn missing_value_breaks_the_trace() {
    let x = AxisMapper::forward(0.0, 10.0, 0.0, 100.0).unwrap();
    let y = AxisMapper::inverted(0.0, 10.0, 0.0, 100.0).unwrap();
    let points = [
        (0.0, Some(5.0)),
        (1.0, Some(5.0)),
        (2.0, None),
        (3.0, Some(5.0)),
        (5.0, Some(5.0)),
    ];

    let (px, stride) = render(|canvas| draw_gap_trace(canvas, &points, &x, &y, 10.0, &style()));

    // Only the adjacent pair at positions 0 and 1 is joined.
    assert!(is_dark(&px, stride, 5, 50));
    // The gap across the missing day is not bridged.
    assert!(!is_dark(&px, stride, 20, 50));
    // Nor is the two-unit jump from position 3 to 5.
    assert!(!is_dark(&px, stride, 40, 50));
}

#[test]
fn unsorted_input_is_ordered_before_drawing() {
    let x = AxisMapper::forward(0.0, 10.0, 0.0, 100.0).unwrap();
    let y = AxisMapper::inverted(0.0, 10.0, 0.0, 100.0).unwrap();
    let points = [(1.0, Some(5.0)), (0.0, Some(5.0))];

    let (px, stride) = render(|canvas| draw_gap_trace(canvas, &points, &x, &y, 10.0, &style()));
    assert!(is_dark(&px, stride, 5, 50));
}

#[test]
fn segments_past_the_clip_endpoint_are_dropped() {
    let x = AxisMapper::forward(0.0, 10.0, 0.0, 100.0).unwrap();
    let y = AxisMapper::inverted(0.0, 10.0, 0.0, 100.0).unwrap();
    let points = [(2.0, Some(5.0)), (3.0, Some(5.0)), (4.0, Some(5.0))];

    let (px, stride) = render(|canvas| draw_gap_trace(canvas, &points, &x, &y, 3.0, &style()));

    // Segment ending at position 3 is inside the clip endpoint.
    assert!(is_dark(&px, stride, 25, 50));
    // Segment ending at position 4 is past it.
    assert!(!is_dark(&px, stride, 35, 50));
}

#[test]
fn route_trace_restarts_after_a_missing_site() {
    let x = AxisMapper::forward(0.0, 10.0, 0.0, 100.0).unwrap();
    let y = AxisMapper::inverted(0.0, 10.0, 0.0, 100.0).unwrap();
    let displacements = [1.0, 4.0, 7.0, 9.0];
    let points = [
        SitePoint::new(1.0, 5.0),
        SitePoint::new(4.0, 5.0),
        SitePoint::missing(7.0),
        SitePoint::new(9.0, 5.0),
    ];

    let (px, stride) =
        render(|canvas| draw_route_trace(canvas, &displacements, &points, &x, &y, &style()));

    // Adjacent measured sites are joined regardless of displacement gap.
    assert!(is_dark(&px, stride, 25, 50));
    // A missing site forgets the previous point, so nothing joins across it.
    assert!(!is_dark(&px, stride, 80, 50));
}
