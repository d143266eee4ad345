// File: crates/traceplot-core/src/axis.rs
// Summary: Data-to-screen affine mapping and the immutable per-render axis
// configuration.

use crate::error::{invalid, PlotError};

/// Orientation and direction of an axis, from its min value to its max value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    VerticalUp,
    VerticalDown,
    HorizontalLeft,
    HorizontalRight,
    Angled,
}

impl Orientation {
    /// Whether increasing data values move against the screen coordinate
    /// direction (screen y grows downward, so a value axis pointing up is
    /// flipped).
    pub fn flipped(self) -> bool {
        matches!(self, Orientation::VerticalUp | Orientation::HorizontalLeft)
    }
}

/// Affine mapping between data coordinates and screen coordinates along one
/// axis. `span` is strictly positive; values outside `[offset, offset+span]`
/// map outside the plot rectangle and rely on the caller's clip region.
#[derive(Clone, Copy, Debug)]
pub struct AxisMapper {
    pub offset: f64,
    pub span: f64,
    pub screen_min: f32,
    pub screen_max: f32,
    pub flipped: bool,
}

impl AxisMapper {
    /// Mapper for an axis whose data direction matches the screen direction
    /// (left-to-right position axes).
    pub fn forward(offset: f64, span: f64, screen_min: f32, screen_max: f32) -> Result<Self, PlotError> {
        Self::new(offset, span, screen_min, screen_max, false)
    }

    /// Mapper for an axis whose data direction opposes the screen direction
    /// (bottom-to-top value axes; screen y grows downward).
    pub fn inverted(offset: f64, span: f64, screen_min: f32, screen_max: f32) -> Result<Self, PlotError> {
        Self::new(offset, span, screen_min, screen_max, true)
    }

    fn new(offset: f64, span: f64, screen_min: f32, screen_max: f32, flipped: bool) -> Result<Self, PlotError> {
        if !span.is_finite() || span <= 0.0 {
            return Err(invalid(format!("axis span must be positive, got {span}")));
        }
        if !offset.is_finite() {
            return Err(invalid("axis offset must be finite"));
        }
        if !screen_min.is_finite() || !screen_max.is_finite() || screen_min == screen_max {
            return Err(invalid("axis screen endpoints must be finite and distinct"));
        }
        Ok(Self { offset, span, screen_min, screen_max, flipped })
    }

    pub fn screen_length(&self) -> f32 {
        self.screen_max - self.screen_min
    }

    /// The screen coordinate of a data value. No clamping.
    pub fn to_screen(&self, value: f64) -> f32 {
        let scaled = ((value - self.offset) * f64::from(self.screen_length()) / self.span) as f32;
        if self.flipped {
            self.screen_max - scaled
        } else {
            self.screen_min + scaled
        }
    }

    /// Inverse of `to_screen`. Batch rendering never needs this, but
    /// interactive callers do.
    pub fn from_screen(&self, px: f32) -> f64 {
        let scaled = if self.flipped {
            self.screen_max - px
        } else {
            px - self.screen_min
        };
        self.offset + f64::from(scaled) * self.span / f64::from(self.screen_length())
    }
}

/// Immutable per-render axis configuration: the nice display limits, the
/// actual data range shown, the screen endpoints, and label metadata.
///
/// Built once per render pass and passed explicitly into mapping and
/// drawing; nothing here is shared or mutated between renders.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    pub orientation: Orientation,
    /// Nice lower display limit; may differ from the lowest data value shown.
    pub min_limit: f64,
    /// Nice upper display limit; may differ from the highest data value shown.
    pub max_limit: f64,
    /// Actual data value range displayed, when known.
    pub data_min: Option<f64>,
    pub data_max: Option<f64>,
    pub screen_min: f32,
    pub screen_max: f32,
    pub label: String,
    pub description: String,
}

impl AxisSpec {
    pub fn new(
        orientation: Orientation,
        min_limit: f64,
        max_limit: f64,
        screen_min: f32,
        screen_max: f32,
        label: impl Into<String>,
    ) -> Result<Self, PlotError> {
        if !min_limit.is_finite() || !max_limit.is_finite() {
            return Err(invalid("axis limits must be finite"));
        }
        if min_limit >= max_limit {
            return Err(invalid(format!(
                "axis min limit {min_limit} must be below max limit {max_limit}"
            )));
        }
        if !screen_min.is_finite() || !screen_max.is_finite() || screen_min == screen_max {
            return Err(invalid("axis screen endpoints must be finite and distinct"));
        }
        Ok(Self {
            orientation,
            min_limit,
            max_limit,
            data_min: None,
            data_max: None,
            screen_min,
            screen_max,
            label: label.into(),
            description: String::new(),
        })
    }

    pub fn with_data_range(mut self, min: f64, max: f64) -> Result<Self, PlotError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(invalid("axis data range must be finite"));
        }
        self.data_min = Some(min);
        self.data_max = Some(max);
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Range between the display limits.
    pub fn range(&self) -> f64 {
        self.max_limit - self.min_limit
    }

    pub fn screen_length(&self) -> f32 {
        self.screen_max - self.screen_min
    }

    pub fn mapper(&self) -> AxisMapper {
        // Limits were validated in the constructor, so this cannot fail.
        AxisMapper {
            offset: self.min_limit,
            span: self.range(),
            screen_min: self.screen_min,
            screen_max: self.screen_max,
            flipped: self.orientation.flipped(),
        }
    }

    /// Screen coordinate for an arbitrary data value.
    pub fn screen_for(&self, value: f64) -> f32 {
        self.mapper().to_screen(value)
    }
}
