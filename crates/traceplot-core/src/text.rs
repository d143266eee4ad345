// File: crates/traceplot-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout; the renderer's only
// source of font metrics.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        // FontCollection is refcounted; the clone is a handle bump.
        let mut builder = ParagraphBuilder::new(&pstyle, self.fonts.clone());
        let style = Self::make_style(size, color, bold);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0), false);
        p.longest_line()
    }

    /// Rendered line height at `size`.
    pub fn line_height(&self, size: f32) -> f32 {
        let p = self.layout("0", size, skia::Color::from_argb(0, 0, 0, 0), false);
        p.height()
    }

    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let p = self.layout(text, size, color, false);
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }

    pub fn draw_left_bold(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let p = self.layout(text, size, color, true);
        p.paint(canvas, (x, y - size * 0.8));
    }

    /// Draw text rotated 90 degrees counter-clockwise with its baseline
    /// anchored at (x, y). Used for the value-axis label and site labels.
    pub fn draw_rotated(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(-90.0, None);
        self.draw_left(canvas, text, 0.0, 0.0, size, color);
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
