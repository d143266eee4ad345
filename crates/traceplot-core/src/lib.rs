// File: crates/traceplot-core/src/lib.rs
// Summary: Core library entry point; exports the public API for plot
// planning and raster rendering.

pub mod axis;
pub mod calendar;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod interval;
pub mod legend;
pub mod series;
pub mod text;
pub mod theme;
pub mod trace;
pub mod types;

pub use axis::{AxisMapper, AxisSpec, Orientation};
pub use calendar::{DateAxisPlan, DateWindow, LabelPlacement, YearAxisPlan};
pub use chart::{AnnualPlot, DailyPlot, Plot, RenderOptions, RoutePlot};
pub use error::PlotError;
pub use interval::NiceInterval;
pub use series::{DaySample, RouteSeries, Series, Site, SitePoint};
pub use text::TextShaper;
pub use theme::Theme;
pub use trace::{Symbol, TraceStyle};
pub use types::Insets;
