// File: crates/traceplot-core/src/theme.rs
// Summary: Theming for plot rendering colors and per-series trace styling.

use skia_safe as skia;

use crate::trace::{Symbol, TraceStyle};

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub plot_background: skia::Color,
    pub axis_line: skia::Color,
    /// Week-boundary gridlines.
    pub grid: skia::Color,
    pub axis_label: skia::Color,
    pub legend_border: skia::Color,
    /// The horizontal reference line on daily plots.
    pub mean_line: skia::Color,
    pub trace_colors: [skia::Color; 3],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::WHITE,
            plot_background: skia::Color::WHITE,
            axis_line: skia::Color::BLACK,
            grid: skia::Color::from_argb(255, 211, 211, 211),
            axis_label: skia::Color::BLACK,
            legend_border: skia::Color::from_argb(255, 211, 211, 211),
            mean_line: skia::Color::from_argb(255, 220, 40, 40),
            trace_colors: [
                skia::Color::from_argb(255, 255, 0, 0),
                skia::Color::from_argb(204, 0, 180, 0),
                skia::Color::from_argb(153, 0, 0, 255),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            plot_background: skia::Color::from_argb(255, 24, 24, 28),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            grid: skia::Color::from_argb(255, 50, 50, 56),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            legend_border: skia::Color::from_argb(255, 90, 90, 100),
            mean_line: skia::Color::from_argb(255, 240, 90, 90),
            trace_colors: [
                skia::Color::from_argb(255, 255, 90, 90),
                skia::Color::from_argb(204, 80, 220, 120),
                skia::Color::from_argb(153, 100, 150, 255),
            ],
        }
    }

    /// Styling for the series at `index`: color, dash pattern, and stroke
    /// width cycle in listing order, so the first series is the boldest.
    pub fn trace_style(&self, index: usize, symbol: Option<Symbol>) -> TraceStyle {
        let dash: Option<Vec<f32>> = match index % 3 {
            0 => None,
            1 => Some(vec![20.0, 5.0]),
            _ => Some(vec![20.0, 5.0, 5.0, 5.0]),
        };
        TraceStyle {
            color: self.trace_colors[index % self.trace_colors.len()],
            stroke_width: (2.0 - index as f32 * 0.5).max(0.75),
            dash,
            symbol,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
