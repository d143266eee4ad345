// File: crates/traceplot-core/src/interval.rs
// Summary: Nice tick-interval selection for continuous numeric axes.

use log::debug;

use crate::error::{invalid, PlotError};

/// Candidate multipliers for a human-readable tick spacing of the form
/// `multiplier * 10^order`.
const MULTIPLIERS: [f64; 4] = [1.0, 2.0, 4.0, 5.0];

/// Upper bound on the interval search. Any finite positive range is covered
/// long before this; hitting it means the caller passed a degenerate range.
const MAX_ORDER: f64 = 1e15;

/// A resolved tick spacing: `interval * num_intervals` covers the data range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NiceInterval {
    pub interval: f64,
    pub num_intervals: u32,
}

impl NiceInterval {
    /// The axis span implied by this selection.
    pub fn span(&self) -> f64 {
        self.interval * f64::from(self.num_intervals)
    }

    /// Number of tick marks, one more than the number of intervals.
    pub fn num_ticks(&self) -> u32 {
        self.num_intervals + 1
    }
}

/// Pick the smallest nice interval whose span, spread across `desired_labels`
/// tick labels, covers `range`; then trim trailing unused intervals without
/// losing coverage.
///
/// Pure and deterministic: identical inputs always yield identical output.
pub fn select(range: f64, desired_labels: u32) -> Result<NiceInterval, PlotError> {
    if !range.is_finite() || range <= 0.0 {
        return Err(invalid(format!(
            "interval selection needs a positive finite range, got {range}"
        )));
    }
    if desired_labels < 2 {
        return Err(invalid(format!(
            "interval selection needs at least 2 labels, got {desired_labels}"
        )));
    }

    let labels = f64::from(desired_labels);
    let mut interval = 0.0;
    let mut found = false;
    let mut order = 1.0;
    while !found {
        if order > MAX_ORDER {
            return Err(PlotError::ArithmeticRange { range });
        }
        for multiplier in MULTIPLIERS {
            interval = multiplier * order;
            if interval * (labels - 1.0) >= range {
                found = true;
                break;
            }
        }
        order *= 10.0;
    }

    // See how many intervals are actually needed: walk the count down while
    // the span still covers the range, keeping the smallest count that does.
    let mut num_intervals = (desired_labels - 1).max(1);
    let mut test = num_intervals;
    while test > 0 && interval * f64::from(test) >= range {
        num_intervals = test;
        test -= 1;
    }

    // Trimming may have left the span short of the range; one more interval
    // restores coverage.
    if interval * f64::from(num_intervals) < range {
        num_intervals += 1;
    }

    debug!("nice interval for range {range}: {interval} x {num_intervals}");
    Ok(NiceInterval { interval, num_intervals })
}

/// Snap `min` down to the nearest interval boundary, giving the lower axis
/// limit for axes that do not start at zero (the displacement axis).
pub fn snap_offset(min: f64, interval: f64) -> f64 {
    (min / interval).floor() * interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_small_ranges() {
        let n = select(7.0, 5).unwrap();
        assert!(n.span() >= 7.0);
        assert_eq!(n.interval, 2.0);
    }

    #[test]
    fn rejects_zero_range() {
        assert!(matches!(select(0.0, 5), Err(PlotError::InvalidArgument(_))));
    }

    #[test]
    fn snaps_offsets_down() {
        assert_eq!(snap_offset(17.3, 5.0), 15.0);
        assert_eq!(snap_offset(20.0, 5.0), 20.0);
    }
}
