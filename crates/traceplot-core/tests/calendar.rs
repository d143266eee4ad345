// File: crates/traceplot-core/tests/calendar.rs
// Purpose: Calendar-aware date axis planning across leap years and axis
// widths.

use chrono::{Datelike, NaiveDate, Weekday};
use traceplot_core::calendar::{day_number, plan, plan_years};
use traceplot_core::{DateWindow, LabelPlacement};

// Fixed per-character width keeps planning independent of installed fonts.
fn measure(text: &str) -> f32 {
    text.chars().count() as f32 * 8.0
}

#[test]
fn year_axis_has_thirteen_ticks() {
    let p = plan(DateWindow::Year(2024), 610.0, &measure).unwrap();
    assert_eq!(p.ticks.len(), 13);
    assert_eq!(p.labels.len(), 12);
    assert_eq!(p.placement, LabelPlacement::BetweenTicks);

    // Leap year: 366 days, span covers the year end exactly.
    assert_eq!(p.offset, day_number(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    assert_eq!(p.span, 365.0);
    assert_eq!(p.clip, p.offset + p.span);

    assert_eq!(p.ticks[0], p.offset);
    assert!((p.ticks[12] - (p.offset + p.span)).abs() < 1e-9);
    assert!(p.ticks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn common_year_spans_364() {
    let p = plan(DateWindow::Year(2023), 610.0, &measure).unwrap();
    assert_eq!(p.span, 364.0);
}

#[test]
fn wide_month_axis_uses_small_day_interval() {
    // 610 px and 16 px day labels allow 25 labels; interval 2 covers a
    // 31-day month.
    let p = plan(DateWindow::Month { year: 2024, month: 3 }, 610.0, &measure).unwrap();
    assert_eq!(p.placement, LabelPlacement::AtTick);
    assert_eq!(p.ticks.len(), 16);
    assert_eq!(p.span, 30.0);
    assert_eq!(p.labels[0].as_deref(), Some("1"));
    assert_eq!(p.labels[1].as_deref(), Some("3"));
    assert_eq!(p.labels[15].as_deref(), Some("31"));

    // The clipping endpoint tracks the true month length, past the span.
    assert_eq!(p.clip, p.offset + 31.0);
}

#[test]
fn narrow_february_leaves_trailing_tick_unlabeled() {
    // 100 px allows only 4 labels; the day interval jumps to 10 and the
    // last tick lands on day 31, past the 28 days of this February.
    let p = plan(DateWindow::Month { year: 2023, month: 2 }, 100.0, &measure).unwrap();
    assert_eq!(p.ticks.len(), 4);
    assert_eq!(p.labels[2].as_deref(), Some("21"));
    assert_eq!(p.labels[3], None);
    assert_eq!(p.span, 30.0);
    assert_eq!(p.clip, p.offset + 28.0);
    assert!(p.clip < p.offset + p.span);
}

#[test]
fn leap_february_has_29_days() {
    let p = plan(DateWindow::Month { year: 2024, month: 2 }, 610.0, &measure).unwrap();
    assert_eq!(p.clip, p.offset + 29.0);
}

#[test]
fn week_starts_fall_on_mondays_inside_window() {
    let p = plan(DateWindow::Month { year: 2024, month: 3 }, 610.0, &measure).unwrap();
    assert_eq!(p.week_starts.len(), 4);
    for &day in &p.week_starts {
        assert!(day >= p.offset && day < p.clip);
        let date = NaiveDate::from_num_days_from_ce_opt(day as i32).unwrap();
        assert_eq!(date.weekday(), Weekday::Mon);
    }
}

#[test]
fn month_axis_label_names_month_and_year() {
    let p = plan(DateWindow::Month { year: 2024, month: 3 }, 610.0, &measure).unwrap();
    assert_eq!(p.axis_label, "March [2024]");
    let p = plan(DateWindow::Year(2024), 610.0, &measure).unwrap();
    assert_eq!(p.axis_label, "Month [2024]");
}

#[test]
fn rejects_out_of_range_month() {
    assert!(plan(DateWindow::Month { year: 2024, month: 0 }, 610.0, &measure).is_err());
    assert!(plan(DateWindow::Month { year: 2024, month: 13 }, 610.0, &measure).is_err());
}

#[test]
fn multi_year_axis_boundaries() {
    let p = plan_years(2020, 2023).unwrap();
    assert_eq!(p.boundaries.len(), 5);
    assert_eq!(p.year_labels, vec!["2020", "2021", "2022", "2023"]);
    assert_eq!(p.offset, day_number(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
    let end = day_number(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    assert_eq!(p.span, end - p.offset + 1.0);
    assert_eq!(*p.boundaries.last().unwrap(), end);
}

#[test]
fn rejects_reversed_year_range() {
    assert!(plan_years(2024, 2020).is_err());
}
