// File: crates/traceplot-core/src/series.rs
// Summary: Data model for date-positioned and displacement-positioned series.

use chrono::NaiveDate;

/// One daily reading. The value is optional so a missing reading stays
/// distinguishable from a zero reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DaySample {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl DaySample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value: Some(value) }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self { date, value: None }
    }
}

/// A named date-positioned series. Supplied by the caller per render call
/// and read-only to the renderer.
#[derive(Clone, Debug)]
pub struct Series {
    pub name: String,
    pub samples: Vec<DaySample>,
}

impl Series {
    pub fn new(name: impl Into<String>, samples: Vec<DaySample>) -> Self {
        Self { name: name.into(), samples }
    }

    pub fn max_value(&self) -> Option<f64> {
        self.samples
            .iter()
            .filter_map(|s| s.value)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.samples.iter().map(|s| s.date).min()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.samples.iter().map(|s| s.date).max()
    }
}

/// Largest present value across a set of series.
pub fn max_value(series: &[Series]) -> Option<f64> {
    series
        .iter()
        .filter_map(Series::max_value)
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

/// Calendar year range covered by a set of series.
pub fn year_range(series: &[Series]) -> Option<(i32, i32)> {
    use chrono::Datelike;
    let min = series.iter().filter_map(Series::min_date).min()?;
    let max = series.iter().filter_map(Series::max_date).max()?;
    Some((min.year(), max.year()))
}

/// One reading along a route, positioned by displacement rather than time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SitePoint {
    pub displacement: f64,
    pub value: Option<f64>,
}

impl SitePoint {
    pub fn new(displacement: f64, value: f64) -> Self {
        Self { displacement, value: Some(value) }
    }

    pub fn missing(displacement: f64) -> Self {
        Self { displacement, value: None }
    }
}

/// A named displacement-positioned series.
#[derive(Clone, Debug)]
pub struct RouteSeries {
    pub name: String,
    pub points: Vec<SitePoint>,
}

impl RouteSeries {
    pub fn new(name: impl Into<String>, points: Vec<SitePoint>) -> Self {
        Self { name: name.into(), points }
    }
}

/// A named measurement site. Used purely for labeling the displacement
/// axis, independent of which sites have data.
#[derive(Clone, Debug)]
pub struct Site {
    pub name: String,
    pub displacement: f64,
}

impl Site {
    pub fn new(name: impl Into<String>, displacement: f64) -> Self {
        Self { name: name.into(), displacement }
    }
}
