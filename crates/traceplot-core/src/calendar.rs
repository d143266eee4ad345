// File: crates/traceplot-core/src/calendar.rs
// Summary: Calendar-aware tick planning for date axes (year, month, and
// multi-year modes), Gregorian leap-year rules included.

use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;

use crate::error::{invalid, PlotError};

/// First day of the week used for the light week-boundary gridlines.
pub const FIRST_DAY_OF_WEEK: Weekday = Weekday::Mon;

/// Label spacing requirement as a fraction of the label size.
pub(crate) const LABEL_SPACING_FACTOR: f32 = 1.5;

pub const MONTH_INITIALS: [&str; 12] =
    ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];
pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// The calendar window a date axis displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateWindow {
    /// A whole calendar year, ticked at month boundaries.
    Year(i32),
    /// A single month, ticked at day-number intervals. `month` is 1..=12.
    Month { year: i32, month: u32 },
}

/// Where a planned label sits relative to the tick marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPlacement {
    /// One label per tick, centered on it (day numbers).
    AtTick,
    /// One label per gap between adjacent ticks (month and year names).
    BetweenTicks,
}

/// A planned date axis. Positions are in day units (days from the common
/// era), the same scale sample dates are mapped in.
#[derive(Clone, Debug)]
pub struct DateAxisPlan {
    /// Day number of the window start.
    pub offset: f64,
    /// Tick-derived span in days. May overshoot the true calendar window in
    /// month mode.
    pub span: f64,
    /// True upper data bound: samples past this day are never drawn, even
    /// when the tick span extends further.
    pub clip: f64,
    /// Tick positions in day units, strictly increasing.
    pub ticks: Vec<f64>,
    /// Labels; `AtTick` pairs them with `ticks`, `BetweenTicks` with the
    /// gaps between consecutive ticks. A `None` marks a tick drawn past the
    /// end of the window, which gets no label.
    pub labels: Vec<Option<String>>,
    pub placement: LabelPlacement,
    /// Day numbers of every week start inside the window.
    pub week_starts: Vec<f64>,
    pub axis_label: String,
}

/// Days from the common era for `date`, as the f64 data-space position.
pub fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Standard Gregorian rule: divisible by 4, except centuries not divisible
/// by 400.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Actual day count of a calendar month (28/29/30/31). `month` is 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, PlotError> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok((next - first).num_days() as u32)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, PlotError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| invalid(format!("month must be 1..=12, got {month} (year {year})")))
}

/// Plan the tick layout of a date axis.
///
/// `axis_px` is the pixel length of the axis; `measure` reports the rendered
/// width of a label candidate.
pub fn plan(
    window: DateWindow,
    axis_px: f32,
    measure: &dyn Fn(&str) -> f32,
) -> Result<DateAxisPlan, PlotError> {
    match window {
        DateWindow::Year(year) => plan_year(year, axis_px, measure),
        DateWindow::Month { year, month } => plan_month(year, month, axis_px, measure),
    }
}

/// Year mode: exactly 13 ticks, one at the first of each month plus the
/// first of the following January, at their fractional-day offsets within
/// the year. Month labels go between the ticks.
fn plan_year(
    year: i32,
    axis_px: f32,
    measure: &dyn Fn(&str) -> f32,
) -> Result<DateAxisPlan, PlotError> {
    let year_start = first_of_month(year, 1)?;
    let num_days = days_in_year(year);
    let offset = day_number(year_start);
    let span = f64::from(num_days - 1);

    // Use the widest month-name set that still fits the axis with the
    // required spacing.
    let width_of = |set: &[&str; 12]| set.iter().map(|s| measure(s)).sum::<f32>();
    let mut months: &[&str; 12] = &MONTH_INITIALS;
    if LABEL_SPACING_FACTOR * width_of(&MONTH_ABBREVS) < axis_px {
        months = &MONTH_ABBREVS;
    }
    if LABEL_SPACING_FACTOR * width_of(&MONTH_NAMES) < axis_px {
        months = &MONTH_NAMES;
    }

    // Month boundaries land at their fraction of the year's day count, so
    // the following-January tick sits exactly on the axis end.
    let mut ticks = Vec::with_capacity(13);
    for tick in 0..13u32 {
        let boundary = if tick == 12 {
            first_of_month(year + 1, 1)?
        } else {
            first_of_month(year, tick + 1)?
        };
        let fraction = (day_number(boundary) - offset) / f64::from(num_days);
        ticks.push(offset + fraction * span);
    }

    let labels = months.iter().map(|m| Some((*m).to_string())).collect();
    let week_starts = week_starts(year_start, num_days);
    debug!("year axis {year}: {num_days} days, label set width {}", months[0].len());

    Ok(DateAxisPlan {
        offset,
        span,
        clip: offset + span,
        ticks,
        labels,
        placement: LabelPlacement::BetweenTicks,
        week_starts,
        axis_label: format!("Month [{year}]"),
    })
}

/// Month mode: day-number ticks at the smallest nice day interval that
/// spans the month within the label count the axis width allows. The tick
/// span may overshoot the month; the clipping endpoint never does.
fn plan_month(
    year: i32,
    month: u32,
    axis_px: f32,
    measure: &dyn Fn(&str) -> f32,
) -> Result<DateAxisPlan, PlotError> {
    let month_start = first_of_month(year, month)?;
    let num_days = days_in_month(year, month)?;
    let offset = day_number(month_start);

    // All day labels are assumed as wide as "00".
    let label_width = measure("00").max(1.0);
    let max_labels = ((axis_px / (label_width * LABEL_SPACING_FACTOR)).floor() as u32).max(2);

    let candidates = [1, 2, 4, 5, 10, num_days];
    let mut interval = 1;
    for candidate in candidates {
        if 1 + candidate * (max_labels - 1) >= num_days {
            interval = candidate;
            break;
        }
    }

    let num_ticks = (1 + (num_days - 1).div_ceil(interval)).max(1);
    let span = f64::from((num_ticks - 1) * interval);

    let mut ticks = Vec::with_capacity(num_ticks as usize);
    let mut labels = Vec::with_capacity(num_ticks as usize);
    for tick in 0..num_ticks {
        ticks.push(offset + f64::from(tick * interval));
        let day = 1 + tick * interval;
        // A trailing tick may land past the end of the month; it is drawn
        // but left unlabeled.
        labels.push((day <= num_days).then(|| day.to_string()));
    }

    let week_starts = week_starts(month_start, num_days);
    debug!("month axis {year}-{month:02}: {num_days} days, interval {interval}");

    Ok(DateAxisPlan {
        offset,
        span,
        // Clip at the true end of the month, not at the tick-derived span.
        clip: offset + f64::from(num_days),
        ticks,
        labels,
        placement: LabelPlacement::AtTick,
        week_starts,
        axis_label: format!("{} [{year}]", MONTH_NAMES[(month - 1) as usize]),
    })
}

/// Walk every day in the window and record the week-start boundaries.
fn week_starts(start: NaiveDate, num_days: u32) -> Vec<f64> {
    let mut starts = Vec::new();
    let mut date = start;
    for _ in 0..num_days {
        if date.weekday() == FIRST_DAY_OF_WEEK {
            starts.push(day_number(date));
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    starts
}

/// A planned multi-year axis for annual comparison plots: one boundary tick
/// per 31 December plus the axis start, year labels centered between them.
#[derive(Clone, Debug)]
pub struct YearAxisPlan {
    pub offset: f64,
    pub span: f64,
    /// Boundary tick positions in day units; the first is the axis start.
    pub boundaries: Vec<f64>,
    /// One label per year, belonging between consecutive boundaries.
    pub year_labels: Vec<String>,
}

pub fn plan_years(min_year: i32, max_year: i32) -> Result<YearAxisPlan, PlotError> {
    if min_year > max_year {
        return Err(invalid(format!(
            "year range start {min_year} is after end {max_year}"
        )));
    }
    let start = first_of_month(min_year, 1)?;
    let end = NaiveDate::from_ymd_opt(max_year, 12, 31)
        .ok_or_else(|| invalid(format!("bad year {max_year}")))?;
    let offset = day_number(start);
    let span = day_number(end) - offset + 1.0;

    let mut boundaries = vec![offset];
    let mut year_labels = Vec::new();
    for year in min_year..=max_year {
        let boundary = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| invalid(format!("bad year {year}")))?;
        boundaries.push(day_number(boundary));
        year_labels.push(year.to_string());
    }

    Ok(YearAxisPlan { offset, span, boundaries, year_labels })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_leap_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn february_day_counts() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(days_in_month(2024, 13).is_err());
        assert!(days_in_month(2024, 0).is_err());
    }
}
