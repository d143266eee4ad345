// File: crates/traceplot-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

/// The rectangle occupied by the plot within the output image, fixed for one
/// render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

impl From<RectF> for skia_safe::Rect {
    fn from(r: RectF) -> Self {
        skia_safe::Rect::from_xywh(r.left, r.top, r.width, r.height)
    }
}
