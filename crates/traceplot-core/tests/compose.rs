// File: crates/traceplot-core/tests/compose.rs
// Purpose: End-to-end plot composition: output shape, stacked legend band,
// trace pixels, and input validation.

use chrono::NaiveDate;
use traceplot_core::{
    AnnualPlot, DailyPlot, DateWindow, DaySample, Plot, RenderOptions, RouteSeries, RoutePlot,
    Series, Site, SitePoint,
};

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

fn march_series() -> Series {
    let samples = (1..=31)
        .map(|d| DaySample::new(day(2024, 3, d), 40.0 + f64::from(d)))
        .collect();
    Series::new("Upper gauge", samples)
}

fn quiet_opts() -> RenderOptions {
    RenderOptions { draw_labels: false, ..RenderOptions::default() }
}

#[test]
fn daily_output_is_plot_plus_legend_band() {
    let plot = DailyPlot::new(vec![march_series()], DateWindow::Month { year: 2024, month: 3 }, "Level [mm]");
    let (px, w, h, stride) = plot.render_to_rgba8(&quiet_opts()).expect("rgba render");

    // 800x600 plot with a 60 px legend band stacked below it.
    assert_eq!(w, 800);
    assert_eq!(h, 660);
    assert_eq!(stride, 800 * 4);
    assert_eq!(px.len(), 800 * 660 * 4);

    // Background is opaque.
    assert_eq!(px[3], 255);
}

#[test]
fn daily_trace_paints_red_inside_the_plot_rect() {
    let plot = DailyPlot::new(vec![march_series()], DateWindow::Month { year: 2024, month: 3 }, "Level [mm]");
    let (px, _, _, stride) = plot.render_to_rgba8(&quiet_opts()).expect("rgba render");

    // The first series draws in red. Scan the plot rectangle (125,30)-(735,525)
    // for trace pixels.
    let mut red = 0usize;
    for y in 30..525usize {
        for x in 125..735usize {
            let p = y * stride + x * 4;
            if px[p] > 180 && px[p + 1] < 100 && px[p + 2] < 100 {
                red += 1;
            }
        }
    }
    assert!(red > 100, "expected a visible trace, found {red} red pixels");
}

#[test]
fn daily_render_smoke_png() {
    let mut plot =
        DailyPlot::new(vec![march_series()], DateWindow::Month { year: 2024, month: 3 }, "Level [mm]");
    plot.title = Some("River level, March 2024".to_string());
    plot.mean_line = Some(55.0);

    let out = std::path::PathBuf::from("target/test_out/daily.png");
    plot.render_to_png(&quiet_opts(), &out).expect("render should succeed");
    assert!(std::fs::metadata(&out).expect("output exists").len() > 0);

    let bytes = plot.render_to_png_bytes(&quiet_opts()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let decoded = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!((decoded.width(), decoded.height()), (800, 660));
}

#[test]
fn year_window_renders() {
    let samples = (1..=12)
        .map(|m| DaySample::new(day(2024, m, 15), f64::from(m) * 3.0))
        .collect();
    let plot = DailyPlot::new(
        vec![Series::new("Monthly spot", samples)],
        DateWindow::Year(2024),
        "Level [mm]",
    );
    let (_, w, h, _) = plot.render_to_rgba8(&quiet_opts()).expect("rgba render");
    assert_eq!((w, h), (800, 660));
}

#[test]
fn annual_comparison_renders() {
    let a = Series::new(
        "Station A",
        (2019..=2024).map(|y| DaySample::new(day(y, 6, 30), f64::from(y - 2018) * 2.0)).collect(),
    );
    let b = Series::new(
        "Station B",
        vec![
            DaySample::new(day(2019, 6, 30), 4.0),
            // 2020 missing: the trace must not bridge 2019 to 2021.
            DaySample::new(day(2021, 6, 30), 6.0),
            DaySample::new(day(2022, 6, 30), 5.0),
        ],
    );
    let plot = AnnualPlot::new(vec![a, b], "Year", "Peak flow [cumecs]");
    let bytes = plot.render_to_png_bytes(&quiet_opts()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}

#[test]
fn route_plot_renders() {
    let sites = vec![
        Site::new("Bridge", 0.0),
        Site::new("Weir", 12.5),
        Site::new("Confluence", 30.0),
    ];
    let series = vec![
        RouteSeries::new(
            "2023",
            vec![SitePoint::new(0.0, 2.0), SitePoint::new(12.5, 3.5), SitePoint::new(30.0, 2.8)],
        ),
        RouteSeries::new(
            "2024",
            vec![SitePoint::new(0.0, 2.2), SitePoint::missing(12.5), SitePoint::new(30.0, 3.0)],
        ),
    ];
    let plot = RoutePlot::new(series, sites, "Displacement [km]", "Flow [cumecs]");
    let (_, w, h, _) = plot.render_to_rgba8(&quiet_opts()).expect("rgba render");
    assert_eq!((w, h), (800, 660));
}

#[test]
fn invalid_input_is_rejected_before_drawing() {
    let window = DateWindow::Month { year: 2024, month: 3 };

    let empty = DailyPlot::new(vec![], window, "Level");
    assert!(empty.compose(&quiet_opts()).is_err());

    let hollow = DailyPlot::new(vec![Series::new("empty", vec![])], window, "Level");
    assert!(hollow.compose(&quiet_opts()).is_err());

    let zero_sized = RenderOptions { width: 0, height: 0, ..quiet_opts() };
    assert!(DailyPlot::new(vec![march_series()], window, "Level").compose(&zero_sized).is_err());

    let mut negative_mean = DailyPlot::new(vec![march_series()], window, "Level");
    negative_mean.mean_line = Some(-1.0);
    assert!(negative_mean.compose(&quiet_opts()).is_err());

    let no_sites = RoutePlot::new(
        vec![RouteSeries::new("2024", vec![SitePoint::new(0.0, 1.0)])],
        vec![],
        "Displacement",
        "Flow",
    );
    assert!(no_sites.compose(&quiet_opts()).is_err());

    let unmeasured = RoutePlot::new(
        vec![RouteSeries::new("2024", vec![SitePoint::missing(5.0)])],
        vec![Site::new("Weir", 5.0)],
        "Displacement",
        "Flow",
    );
    assert!(unmeasured.compose(&quiet_opts()).is_err());
}
