// File: crates/traceplot-core/src/legend.rs
// Summary: Legend band rendering: per-series swatch, name, and optional
// symbol, composed as its own raster image.

use anyhow::Result;
use skia_safe as skia;

use crate::text::TextShaper;
use crate::theme::Theme;
use crate::trace::TraceStyle;

const LABEL_SIZE: f32 = 14.0;
const BORDER_SPACING: f32 = 20.0;
const ENTRY_SPACING: f32 = 40.0;
const SWATCH_LENGTH: f32 = 30.0;
const SWATCH_LABEL_SPACING: f32 = 10.0;

/// One legend row: a series name and the style its trace was drawn with.
pub struct LegendEntry {
    pub name: String,
    pub style: TraceStyle,
}

/// Render the legend band as a separate image of the given dimensions.
/// Keeping it off the plot surface keeps the axis coordinate math free of
/// legend-height concerns; the composer stacks the two images afterwards.
pub fn render_legend(
    title: &str,
    entries: &[LegendEntry],
    width: i32,
    height: i32,
    theme: &Theme,
    shaper: &TextShaper,
    draw_labels: bool,
) -> Result<skia::Image> {
    let mut surface = skia::surfaces::raster_n32_premul((width, height))
        .ok_or_else(|| anyhow::anyhow!("failed to create legend surface"))?;
    let canvas = surface.canvas();
    canvas.clear(theme.background);

    let h = height as f32;
    let mid = h / 2.0;
    let left = crate::types::Insets::default().left as f32;

    // Swatches and names, left to right.
    let mut x = left + BORDER_SPACING;
    for (index, entry) in entries.iter().enumerate() {
        let paint = entry.style.line_paint();
        canvas.draw_line((x, mid), (x + SWATCH_LENGTH, mid), &paint);
        if let Some(symbol) = entry.style.symbol {
            crate::trace::draw_symbol(canvas, symbol, x + SWATCH_LENGTH / 2.0, mid, &entry.style.symbol_paint());
        }
        x += SWATCH_LENGTH + SWATCH_LABEL_SPACING;

        if draw_labels {
            shaper.draw_left(canvas, &entry.name, x, mid + LABEL_SIZE * 0.35, LABEL_SIZE, theme.axis_label);
        }
        x += measure(shaper, &entry.name, draw_labels);
        if index + 1 != entries.len() {
            x += ENTRY_SPACING;
        }
    }
    x += BORDER_SPACING;

    // Border, broken around the title on the top edge.
    let top = h / 5.0;
    let bottom = 4.0 * h / 5.0;
    let title_width = measure(shaper, title, draw_labels);
    let mut border = skia::Paint::default();
    border.set_color(theme.legend_border);
    border.set_anti_alias(true);
    border.set_stroke_width(1.0);

    canvas.draw_line((left, bottom), (x, bottom), &border);
    canvas.draw_line((left, top), (left, bottom), &border);
    canvas.draw_line((x, top), (x, bottom), &border);
    canvas.draw_line((left, top), (left + BORDER_SPACING, top), &border);
    canvas.draw_line((left + 2.0 * BORDER_SPACING + title_width, top), (x, top), &border);

    if draw_labels {
        shaper.draw_left(canvas, title, left + 1.5 * BORDER_SPACING, top + LABEL_SIZE * 0.35, LABEL_SIZE, theme.axis_label);
    }

    Ok(surface.image_snapshot())
}

fn measure(shaper: &TextShaper, text: &str, draw_labels: bool) -> f32 {
    if draw_labels {
        shaper.measure_width(text, LABEL_SIZE)
    } else {
        text.chars().count() as f32 * LABEL_SIZE * 0.6
    }
}
