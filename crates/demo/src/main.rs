// File: crates/demo/src/main.rs
// Summary: Demo renders a month plot, a year plot, an annual comparison,
// and a route plot from synthetic gauge data.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use traceplot_core::{
    AnnualPlot, DailyPlot, DateWindow, DaySample, Plot, RenderOptions, RoutePlot, RouteSeries,
    Series, Site, SitePoint,
};

fn main() -> Result<()> {
    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "target/demo_out".to_string());
    let opts = RenderOptions::default();

    let march = daily_series(2024, 3);
    let mut month_plot = DailyPlot::new(
        march.clone(),
        DateWindow::Month { year: 2024, month: 3 },
        "Level [mm]",
    );
    month_plot.title = Some("River level, March 2024".to_string());
    month_plot.mean_line = Some(mean_of(&march));
    let out = format!("{out_dir}/month.png");
    month_plot.render_to_png(&opts, &out)?;
    println!("Wrote {out}");

    let mut year_plot = DailyPlot::new(year_series(2024), DateWindow::Year(2024), "Level [mm]");
    year_plot.title = Some("River level, 2024".to_string());
    let out = format!("{out_dir}/year.png");
    year_plot.render_to_png(&opts, &out)?;
    println!("Wrote {out}");

    let mut annual = AnnualPlot::new(annual_series(), "Year", "Peak flow [cumecs]");
    annual.title = Some("Annual peak flow by station".to_string());
    let out = format!("{out_dir}/annual.png");
    annual.render_to_png(&opts, &out)?;
    println!("Wrote {out}");

    let mut route = route_plot();
    route.title = Some("Flow along the river".to_string());
    let out = format!("{out_dir}/route.png");
    route.render_to_png(&opts, &out)?;
    println!("Wrote {out}");

    Ok(())
}

/// Two gauges over one month, with a mid-month outage on the second.
fn daily_series(year: i32, month: u32) -> Vec<Series> {
    let mut upper = Vec::new();
    let mut lower = Vec::new();
    for d in 1..=31 {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, d) else { break };
        let base = 60.0 + 18.0 * (f64::from(d) / 5.0).sin();
        upper.push(DaySample::new(date, base + 4.0));
        if (12..=15).contains(&d) {
            lower.push(DaySample::missing(date));
        } else {
            lower.push(DaySample::new(date, base * 0.8));
        }
    }
    vec![Series::new("Upper gauge", upper), Series::new("Lower gauge", lower)]
}

fn year_series(year: i32) -> Vec<Series> {
    let mut samples = Vec::new();
    let mut date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let mut day = 0f64;
    while date.year() == year {
        let value = 55.0 + 25.0 * (day / 40.0).sin() + 10.0 * (day / 7.0).cos();
        samples.push(DaySample::new(date, value.max(0.0)));
        date = date.succ_opt().unwrap();
        day += 1.0;
    }
    vec![Series::new("Upper gauge", samples)]
}

fn annual_series() -> Vec<Series> {
    let station = |name: &str, values: &[(i32, Option<f64>)]| {
        let samples = values
            .iter()
            .map(|&(year, value)| {
                let date = NaiveDate::from_ymd_opt(year, 6, 30).unwrap();
                match value {
                    Some(v) => DaySample::new(date, v),
                    None => DaySample::missing(date),
                }
            })
            .collect();
        Series::new(name, samples)
    };
    vec![
        station(
            "Station A",
            &[(2019, Some(210.0)), (2020, Some(180.0)), (2021, Some(260.0)), (2022, Some(240.0)), (2023, Some(190.0)), (2024, Some(280.0))],
        ),
        station(
            "Station B",
            &[(2019, Some(120.0)), (2020, None), (2021, Some(150.0)), (2022, Some(140.0)), (2023, Some(170.0)), (2024, Some(130.0))],
        ),
    ]
}

fn route_plot() -> RoutePlot {
    let sites = vec![
        Site::new("Bridge", 0.0),
        Site::new("Weir", 8.5),
        Site::new("Gorge", 17.0),
        Site::new("Confluence", 29.5),
    ];
    let series = vec![
        RouteSeries::new(
            "2023",
            vec![
                SitePoint::new(0.0, 2.1),
                SitePoint::new(8.5, 3.4),
                SitePoint::new(17.0, 3.9),
                SitePoint::new(29.5, 5.2),
            ],
        ),
        RouteSeries::new(
            "2024",
            vec![
                SitePoint::new(0.0, 2.4),
                SitePoint::missing(8.5),
                SitePoint::new(17.0, 4.3),
                SitePoint::new(29.5, 5.6),
            ],
        ),
    ];
    RoutePlot::new(series, sites, "Distance downstream [km]", "Flow [cumecs]")
}

fn mean_of(series: &[Series]) -> f64 {
    let values: Vec<f64> = series
        .iter()
        .flat_map(|s| s.samples.iter().filter_map(|x| x.value))
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
