// File: crates/traceplot-core/src/types.rs
// Summary: Shared types and constants (sizes, insets, legend fraction).

/// Default output width in pixels.
pub const WIDTH: i32 = 800;
/// Default output height in pixels.
pub const HEIGHT: i32 = 600;

/// The legend band below the plot is `height / LEGEND_DIVISOR` pixels tall.
pub const LEGEND_DIVISOR: i32 = 10;

/// Screen margins reserved around the plot rectangle, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 {
        self.top + self.bottom
    }

    /// Insets for route plots, which need extra headroom for the title and
    /// rotated site labels below the axis.
    pub const fn route() -> Self {
        Self::new(125, 65, 60, 75)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(125, 65, 30, 75)
    }
}
