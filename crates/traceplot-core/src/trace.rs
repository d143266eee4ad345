// File: crates/traceplot-core/src/trace.rs
// Summary: Trace rendering with missing-data gap detection, axis clipping,
// and symbol markers for multi-year comparisons.

use chrono::Datelike;
use skia_safe as skia;

use crate::axis::AxisMapper;
use crate::series::{DaySample, SitePoint};

/// Marker drawn at each data point of a symbol-marked trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Plus,
    Cross,
    Star,
}

const SYMBOL_HALF: f32 = 4.0;

/// Visual styling of one trace.
#[derive(Clone, Debug)]
pub struct TraceStyle {
    pub color: skia::Color,
    pub stroke_width: f32,
    /// On/off dash intervals; `None` draws a solid line.
    pub dash: Option<Vec<f32>>,
    pub symbol: Option<Symbol>,
}

impl TraceStyle {
    /// Paint for the connecting line segments.
    pub(crate) fn line_paint(&self) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_color(self.color);
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(self.stroke_width);
        paint.set_stroke_cap(skia::paint::Cap::Round);
        paint.set_stroke_join(skia::paint::Join::Round);
        if let Some(dash) = &self.dash {
            paint.set_path_effect(skia::PathEffect::dash(dash, 0.0));
        }
        paint
    }

    /// Paint for symbol markers: always a plain solid stroke, independent of
    /// the connecting-line dash.
    pub(crate) fn symbol_paint(&self) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_color(self.color);
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(1.0);
        paint
    }
}

/// Walk a position-ordered series and draw connecting segments, skipping
/// segments that cross a data gap or leave the clipping window.
///
/// Points are `(position, value)` in data space. The series is stable-sorted
/// by position first. A segment to the previous plotted point is drawn only
/// when all hold: a previous point exists, the rounded absolute position gap
/// is at most one unit, and the position lies within `[mapper.offset, clip]`.
/// Absent values are skipped and do not reset the previous point, so a
/// missing day shows as a break in the trace rather than an interpolated
/// line.
pub fn draw_gap_trace(
    canvas: &skia::Canvas,
    points: &[(f64, Option<f64>)],
    x: &AxisMapper,
    y: &AxisMapper,
    clip: f64,
    style: &TraceStyle,
) {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let paint = style.line_paint();
    let mut previous: Option<(f64, f32, f32)> = None;

    for (position, value) in sorted {
        let Some(value) = value else { continue };
        let sx = x.to_screen(position);
        let sy = y.to_screen(value);

        if let Some((prev_pos, px, py)) = previous {
            let gap = (position - prev_pos).abs().round();
            if gap <= 1.0 && position >= x.offset && position <= clip {
                canvas.draw_line((px, py), (sx, sy), &paint);
            }
        }
        previous = Some((position, sx, sy));
    }
}

/// Draw a symbol-marked annual trace: every present sample gets a marker,
/// and a connecting line is drawn only between samples whose calendar years
/// are exactly one apart. Non-adjacent years are never joined as if they
/// were continuous.
pub fn draw_year_trace(
    canvas: &skia::Canvas,
    samples: &[DaySample],
    x: &AxisMapper,
    y: &AxisMapper,
    style: &TraceStyle,
) {
    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.date);

    let line_paint = style.line_paint();
    let symbol_paint = style.symbol_paint();
    let mut previous: Option<(i32, f32, f32)> = None;

    for sample in sorted {
        let Some(value) = sample.value else { continue };
        let sx = x.to_screen(crate::calendar::day_number(sample.date));
        let sy = y.to_screen(value);

        if let Some(symbol) = style.symbol {
            draw_symbol(canvas, symbol, sx, sy, &symbol_paint);
        }

        let year = sample.date.year();
        if let Some((prev_year, px, py)) = previous {
            if year == prev_year + 1 {
                canvas.draw_line((px, py), (sx, sy), &line_paint);
            }
        }
        previous = Some((year, sx, sy));
    }
}

/// Draw a route trace across the sorted unique site displacements. A site
/// with no measurement in this series breaks the line: the previous point
/// is forgotten, so the trace restarts at the next measured site.
pub fn draw_route_trace(
    canvas: &skia::Canvas,
    displacements: &[f64],
    points: &[SitePoint],
    x: &AxisMapper,
    y: &AxisMapper,
    style: &TraceStyle,
) {
    let paint = style.line_paint();
    let mut previous: Option<(f32, f32)> = None;

    for &displacement in displacements {
        let value = points
            .iter()
            .find(|p| p.displacement == displacement)
            .and_then(|p| p.value);

        match value {
            Some(value) => {
                let sx = x.to_screen(displacement);
                let sy = y.to_screen(value);
                if let Some((px, py)) = previous {
                    canvas.draw_line((px, py), (sx, sy), &paint);
                }
                previous = Some((sx, sy));
            }
            None => previous = None,
        }
    }
}

pub(crate) fn draw_symbol(canvas: &skia::Canvas, symbol: Symbol, x: f32, y: f32, paint: &skia::Paint) {
    let h = SYMBOL_HALF;
    if matches!(symbol, Symbol::Cross | Symbol::Star) {
        canvas.draw_line((x - h, y - h), (x + h, y + h), paint);
        canvas.draw_line((x - h, y + h), (x + h, y - h), paint);
    }
    if matches!(symbol, Symbol::Plus | Symbol::Star) {
        canvas.draw_line((x - h, y), (x + h, y), paint);
        canvas.draw_line((x, y - h), (x, y + h), paint);
    }
}
