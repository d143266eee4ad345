// File: crates/traceplot-core/src/chart.rs
// Summary: Plot composition: axis layout, backgrounds, trace ordering, and
// legend stacking into a final raster image, headless via Skia CPU surfaces.

use anyhow::Result;
use log::debug;
use skia_safe as skia;

use crate::axis::{AxisMapper, AxisSpec, Orientation};
use crate::calendar::{self, DateWindow, LabelPlacement, YearAxisPlan, LABEL_SPACING_FACTOR};
use crate::error::{invalid, PlotError};
use crate::geometry::RectF;
use crate::interval::{self, NiceInterval};
use crate::legend::{render_legend, LegendEntry};
use crate::series::{self, RouteSeries, Series, Site};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::trace::{self, Symbol};
use crate::types::{Insets, HEIGHT, LEGEND_DIVISOR, WIDTH};

const LABEL_SIZE: f32 = 14.0;
const TITLE_SIZE: f32 = 17.0;
const TICK_LENGTH: f32 = 7.0;
/// Week gridlines are skipped on year axes narrower than this; everything
/// gets too cramped below it.
const WEEK_GRID_MIN_AXIS_PX: f32 = 200.0;
/// Marker cycle for annual comparison traces, in series listing order.
const SYMBOLS: [Symbol; 3] = [Symbol::Plus, Symbol::Cross, Symbol::Star];

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    /// Disable to skip all text drawing (and use fixed width estimates for
    /// layout), which keeps output deterministic across font installations.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, theme: Theme::light(), draw_labels: true }
    }
}

/// A renderable plot. One render call is synchronous and owns all of its
/// state; nothing is shared between calls.
pub trait Plot {
    /// Validate inputs and compose the full output image (plot stacked above
    /// its legend band). Fails before any drawing on invalid input.
    fn compose(&self, opts: &RenderOptions) -> Result<skia::Image>;

    fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        encode_png(&self.compose(opts)?)
    }

    fn render_to_png(&self, opts: &RenderOptions, path: impl AsRef<std::path::Path>) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Compose and read back as an RGBA8 buffer: `(pixels, width, height,
    /// stride)`.
    fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let image = self.compose(opts)?;
        let (w, h) = (image.width(), image.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !image.read_pixels(&info, &mut pixels, stride, (0, 0), skia::image::CachingHint::Allow) {
            anyhow::bail!("failed to read back RGBA pixels");
        }
        Ok((pixels, w, h, stride))
    }
}

/// Value-vs-date plot over a single year or month window. One or more
/// series; a missing day shows as a break in the trace.
pub struct DailyPlot {
    pub series: Vec<Series>,
    pub window: DateWindow,
    pub value_label: String,
    pub title: Option<String>,
    /// Optional horizontal reference line, e.g. the period mean.
    pub mean_line: Option<f64>,
}

impl DailyPlot {
    pub fn new(series: Vec<Series>, window: DateWindow, value_label: impl Into<String>) -> Self {
        Self { series, window, value_label: value_label.into(), title: None, mean_line: None }
    }
}

impl Plot for DailyPlot {
    fn compose(&self, opts: &RenderOptions) -> Result<skia::Image> {
        validate_dims(opts)?;
        validate_series(&self.series)?;
        if let Some(mean) = self.mean_line {
            if !mean.is_finite() || mean < 0.0 {
                return Err(invalid(format!("mean line must be zero or greater, got {mean}")).into());
            }
        }

        let shaper = TextShaper::new();
        let measure = measurer(&shaper, opts.draw_labels);
        let label_h = label_height(&shaper, opts.draw_labels);
        let plot = plot_rect(opts.width, opts.height, Insets::default());

        // Value axis always starts at zero so magnitude comparisons against
        // zero stay meaningful on the rendered axis.
        let max_value = series::max_value(&self.series).unwrap_or(0.0);
        let (nice, value_axis) = plan_value_axis(max_value, &plot, label_h, &self.value_label)?;

        let date_plan = calendar::plan(self.window, plot.width, &measure)?;
        let position_axis = AxisSpec::new(
            Orientation::HorizontalRight,
            date_plan.offset,
            date_plan.offset + date_plan.span,
            plot.left,
            plot.right(),
            date_plan.axis_label.clone(),
        )?;
        debug!("daily plot: {} series over {:?}", self.series.len(), self.window);

        let mut surface = make_surface(opts)?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);
        fill_plot_background(canvas, &plot, &opts.theme);

        let x = position_axis.mapper();
        let y = value_axis.mapper();

        let draw_week_grid = match self.window {
            DateWindow::Year(_) => plot.width > WEEK_GRID_MIN_AXIS_PX,
            DateWindow::Month { .. } => true,
        };
        if draw_week_grid {
            week_gridlines(canvas, &date_plan.week_starts, &x, &plot, &opts.theme);
        }

        // Value axis first: the date axis may overlay rotated labels that
        // must not be clipped by it.
        draw_value_axis(canvas, &shaper, &plot, &nice, &value_axis, &opts.theme, opts.draw_labels, label_h);
        draw_date_axis(canvas, &shaper, &plot, &date_plan, &x, &opts.theme, opts.draw_labels, label_h);
        draw_frame(canvas, &plot, &opts.theme);

        if let (Some(title), true) = (&self.title, opts.draw_labels) {
            draw_title(canvas, &shaper, &plot, title, &opts.theme);
        }

        // Reverse order, so the first-listed series paints last and on top.
        canvas.save();
        canvas.clip_rect(skia::Rect::from(plot), None, None);
        for (index, s) in self.series.iter().enumerate().rev() {
            let style = opts.theme.trace_style(index, None);
            let points: Vec<(f64, Option<f64>)> = s
                .samples
                .iter()
                .map(|sample| (calendar::day_number(sample.date), sample.value))
                .collect();
            trace::draw_gap_trace(canvas, &points, &x, &y, date_plan.clip, &style);
        }
        canvas.restore();

        if let Some(mean) = self.mean_line {
            let paint = solid_paint(opts.theme.mean_line, 1.0);
            let sy = y.to_screen(mean);
            canvas.draw_line((plot.left - 1.0, sy), (plot.right() + 1.0, sy), &paint);
        }

        let entries = legend_entries(&self.series, &opts.theme, None);
        let legend = render_legend(
            "Series",
            &entries,
            opts.width,
            opts.height / LEGEND_DIVISOR,
            &opts.theme,
            &shaper,
            opts.draw_labels,
        )?;
        stack_with_legend(&surface.image_snapshot(), &legend, &opts.theme)
    }
}

/// Multi-year comparison plot: symbol-marked traces of one value per year,
/// joined only across adjacent years.
pub struct AnnualPlot {
    pub series: Vec<Series>,
    pub title: Option<String>,
    pub year_label: String,
    pub value_label: String,
}

impl AnnualPlot {
    pub fn new(series: Vec<Series>, year_label: impl Into<String>, value_label: impl Into<String>) -> Self {
        Self { series, title: None, year_label: year_label.into(), value_label: value_label.into() }
    }
}

impl Plot for AnnualPlot {
    fn compose(&self, opts: &RenderOptions) -> Result<skia::Image> {
        validate_dims(opts)?;
        validate_series(&self.series)?;

        let shaper = TextShaper::new();
        let label_h = label_height(&shaper, opts.draw_labels);
        let plot = plot_rect(opts.width, opts.height, Insets::default());

        let (min_year, max_year) =
            series::year_range(&self.series).ok_or_else(|| invalid("series contain no dated samples"))?;
        let year_plan = calendar::plan_years(min_year, max_year)?;

        let max_value = series::max_value(&self.series).unwrap_or(0.0);
        let (nice, value_axis) = plan_value_axis(max_value, &plot, label_h, &self.value_label)?;
        let position_axis = AxisSpec::new(
            Orientation::HorizontalRight,
            year_plan.offset,
            year_plan.offset + year_plan.span,
            plot.left,
            plot.right(),
            self.year_label.clone(),
        )?;
        debug!("annual plot: {} series over {min_year}..={max_year}", self.series.len());

        let mut surface = make_surface(opts)?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);
        fill_plot_background(canvas, &plot, &opts.theme);

        let x = position_axis.mapper();
        let y = value_axis.mapper();

        draw_value_axis(canvas, &shaper, &plot, &nice, &value_axis, &opts.theme, opts.draw_labels, label_h);
        draw_year_axis(canvas, &shaper, &plot, &year_plan, &x, &self.year_label, &opts.theme, opts.draw_labels, label_h);
        draw_frame(canvas, &plot, &opts.theme);

        if let (Some(title), true) = (&self.title, opts.draw_labels) {
            draw_title(canvas, &shaper, &plot, title, &opts.theme);
        }

        canvas.save();
        canvas.clip_rect(skia::Rect::from(plot), None, None);
        for (index, s) in self.series.iter().enumerate().rev() {
            let style = opts.theme.trace_style(index, Some(SYMBOLS[index % SYMBOLS.len()]));
            trace::draw_year_trace(canvas, &s.samples, &x, &y, &style);
        }
        canvas.restore();

        let entries = legend_entries(&self.series, &opts.theme, Some(&SYMBOLS));
        let legend = render_legend(
            "Site",
            &entries,
            opts.width,
            opts.height / LEGEND_DIVISOR,
            &opts.theme,
            &shaper,
            opts.draw_labels,
        )?;
        stack_with_legend(&surface.image_snapshot(), &legend, &opts.theme)
    }
}

/// Value-vs-displacement plot along a route with named measurement sites
/// labeling the x axis.
pub struct RoutePlot {
    pub series: Vec<RouteSeries>,
    pub sites: Vec<Site>,
    pub title: Option<String>,
    pub displacement_label: String,
    pub value_label: String,
}

impl RoutePlot {
    pub fn new(
        series: Vec<RouteSeries>,
        sites: Vec<Site>,
        displacement_label: impl Into<String>,
        value_label: impl Into<String>,
    ) -> Self {
        Self {
            series,
            sites,
            title: None,
            displacement_label: displacement_label.into(),
            value_label: value_label.into(),
        }
    }
}

impl Plot for RoutePlot {
    fn compose(&self, opts: &RenderOptions) -> Result<skia::Image> {
        validate_dims(opts)?;
        if self.series.is_empty() {
            return Err(invalid("route plot needs at least one data series").into());
        }
        if self.sites.is_empty() {
            return Err(invalid("route plot needs at least one measurement site").into());
        }

        let shaper = TextShaper::new();
        let measure = measurer(&shaper, opts.draw_labels);
        let label_h = label_height(&shaper, opts.draw_labels);

        // Sites label the axis whether or not they have data; displacements
        // from both sides form the x domain.
        let mut displacements: Vec<f64> = self
            .sites
            .iter()
            .map(|s| s.displacement)
            .chain(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.displacement)))
            .collect();
        displacements.sort_by(f64::total_cmp);
        displacements.dedup();

        let min_disp = displacements[0];
        let max_disp = *displacements.last().unwrap_or(&min_disp);
        let max_value = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().filter_map(|p| p.value))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            .ok_or_else(|| invalid("route series contain no measured values"))?;

        // Reserve room under the axis for the rotated site labels.
        let longest_site = self
            .sites
            .iter()
            .map(|s| measure(&s.name))
            .fold(0.0f32, f32::max);
        let mut plot = plot_rect(opts.width, opts.height, Insets::route());
        plot.height = (plot.height - LABEL_SPACING_FACTOR * longest_site).max(10.0);

        // Displacement axis: nice interval over the integer-widened range,
        // lower limit snapped down to an interval boundary.
        let range = max_disp.ceil() - min_disp.floor() + 1.0;
        let widest = measure(&format!("{}", max_disp.ceil() as i64));
        let desired = ((plot.width / (widest * LABEL_SPACING_FACTOR)).floor() as u32).max(2);
        let x_nice = interval::select(range, desired)?;
        let x_offset = interval::snap_offset(min_disp, x_nice.interval);
        let mut x_intervals = x_nice.num_intervals;
        // Snapping the lower limit may have pulled the upper limit below the
        // data maximum; one more interval restores coverage.
        if x_offset + x_nice.span() < max_disp {
            x_intervals += 1;
        }
        let x_span = x_nice.interval * f64::from(x_intervals);

        let (y_nice, value_axis) = plan_value_axis(max_value, &plot, label_h, &self.value_label)?;
        let position_axis = AxisSpec::new(
            Orientation::HorizontalRight,
            x_offset,
            x_offset + x_span,
            plot.left,
            plot.right(),
            self.displacement_label.clone(),
        )?;
        debug!(
            "route plot: {} series, {} sites, displacement {min_disp}..{max_disp}",
            self.series.len(),
            self.sites.len()
        );

        let mut surface = make_surface(opts)?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);
        fill_plot_background(canvas, &plot, &opts.theme);

        let x = position_axis.mapper();
        let y = value_axis.mapper();

        draw_value_axis(canvas, &shaper, &plot, &y_nice, &value_axis, &opts.theme, opts.draw_labels, label_h);
        let axis_label_bottom = draw_displacement_axis(
            canvas,
            &shaper,
            &plot,
            &x_nice,
            x_intervals,
            x_offset,
            &x,
            &self.displacement_label,
            &opts.theme,
            opts.draw_labels,
            label_h,
        );
        draw_site_labels(canvas, &shaper, &self.sites, &x, axis_label_bottom, label_h, &measure, &opts.theme, opts.draw_labels);
        draw_frame(canvas, &plot, &opts.theme);

        if let (Some(title), true) = (&self.title, opts.draw_labels) {
            draw_title(canvas, &shaper, &plot, title, &opts.theme);
        }

        canvas.save();
        canvas.clip_rect(skia::Rect::from(plot), None, None);
        for (index, s) in self.series.iter().enumerate().rev() {
            let style = opts.theme.trace_style(index, None);
            trace::draw_route_trace(canvas, &displacements, &s.points, &x, &y, &style);
        }
        canvas.restore();

        let entries: Vec<LegendEntry> = self
            .series
            .iter()
            .enumerate()
            .map(|(index, s)| LegendEntry {
                name: s.name.clone(),
                style: opts.theme.trace_style(index, None),
            })
            .collect();
        let legend = render_legend(
            "Year",
            &entries,
            opts.width,
            opts.height / LEGEND_DIVISOR,
            &opts.theme,
            &shaper,
            opts.draw_labels,
        )?;
        stack_with_legend(&surface.image_snapshot(), &legend, &opts.theme)
    }
}

// ---- shared layout and drawing helpers --------------------------------------

/// The rectangle available for the plot once the fixed insets are reserved
/// for axes, labels, and the title.
pub fn plot_rect(width: i32, height: i32, insets: Insets) -> RectF {
    RectF::from_ltwh(
        insets.left as f32,
        insets.top as f32,
        (width - insets.hsum() as i32) as f32,
        (height - insets.vsum() as i32) as f32,
    )
}

fn validate_dims(opts: &RenderOptions) -> Result<(), PlotError> {
    if opts.width < 1 || opts.height < 1 {
        return Err(invalid(format!(
            "output dimensions must be positive, got {}x{}",
            opts.width, opts.height
        )));
    }
    Ok(())
}

fn validate_series(series: &[Series]) -> Result<(), PlotError> {
    if series.is_empty() {
        return Err(invalid("plot needs at least one data series"));
    }
    if series.iter().any(|s| s.samples.is_empty()) {
        return Err(invalid("every series needs at least one sample"));
    }
    Ok(())
}

fn make_surface(opts: &RenderOptions) -> Result<skia::Surface> {
    skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))
}

fn measurer<'a>(shaper: &'a TextShaper, draw_labels: bool) -> impl Fn(&str) -> f32 + 'a {
    move |text: &str| {
        if draw_labels {
            shaper.measure_width(text, LABEL_SIZE)
        } else {
            text.chars().count() as f32 * LABEL_SIZE * 0.6
        }
    }
}

fn label_height(shaper: &TextShaper, draw_labels: bool) -> f32 {
    if draw_labels {
        shaper.line_height(LABEL_SIZE)
    } else {
        LABEL_SIZE * 1.2
    }
}

/// Plan the zero-based value axis: pick the nice interval for the label
/// count the plot height allows and wrap it in an immutable axis spec.
fn plan_value_axis(
    max_value: f64,
    plot: &RectF,
    label_h: f32,
    label: &str,
) -> Result<(NiceInterval, AxisSpec), PlotError> {
    let desired = ((plot.height / (label_h * LABEL_SPACING_FACTOR)).floor() as u32).max(2);
    // A range below one unit would loop the interval search forever; the
    // axis never shows less than one unit.
    let nice = interval::select(max_value.max(1.0), desired)?;
    let axis = AxisSpec::new(Orientation::VerticalUp, 0.0, nice.span(), plot.top, plot.bottom(), label)?
        .with_data_range(0.0, max_value)?;
    Ok((nice, axis))
}

fn solid_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_stroke_width(width);
    paint
}

fn fill_plot_background(canvas: &skia::Canvas, plot: &RectF, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.plot_background);
    canvas.draw_rect(skia::Rect::from(*plot), &paint);
}

/// Top and right plot borders; the axes draw the other two sides.
fn draw_frame(canvas: &skia::Canvas, plot: &RectF, theme: &Theme) {
    let paint = solid_paint(theme.axis_line, 1.0);
    canvas.draw_line(
        (plot.left - 1.0, plot.top - 1.0),
        (plot.right() + 1.0, plot.top - 1.0),
        &paint,
    );
    canvas.draw_line(
        (plot.right() + 1.0, plot.top - 1.0),
        (plot.right() + 1.0, plot.bottom() + 1.0),
        &paint,
    );
}

fn draw_title(canvas: &skia::Canvas, shaper: &TextShaper, plot: &RectF, title: &str, theme: &Theme) {
    let w = shaper.measure_width(title, TITLE_SIZE);
    shaper.draw_left_bold(
        canvas,
        title,
        plot.center_x() - w / 2.0,
        plot.top / 2.0 + TITLE_SIZE * 0.35,
        TITLE_SIZE,
        theme.axis_label,
    );
}

fn week_gridlines(canvas: &skia::Canvas, week_starts: &[f64], x: &AxisMapper, plot: &RectF, theme: &Theme) {
    let paint = solid_paint(theme.grid, 1.0);
    for &day in week_starts {
        let sx = x.to_screen(day);
        if sx >= plot.left && sx <= plot.right() {
            canvas.draw_line((sx, plot.top), (sx, plot.bottom()), &paint);
        }
    }
}

/// Left vertical axis: line, ticks, numeric labels, rotated axis label.
fn draw_value_axis(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectF,
    nice: &NiceInterval,
    axis: &AxisSpec,
    theme: &Theme,
    draw_labels: bool,
    label_h: f32,
) {
    let paint = solid_paint(theme.axis_line, 1.0);
    canvas.draw_line(
        (plot.left - 1.0, plot.top - 1.0),
        (plot.left - 1.0, plot.bottom() + 1.0),
        &paint,
    );

    let mapper = axis.mapper();
    let mut x_min_label = f32::MAX;
    for tick in 0..nice.num_ticks() {
        let value = f64::from(tick) * nice.interval;
        let sy = mapper.to_screen(value);
        canvas.draw_line(
            (plot.left - 1.0, sy),
            (plot.left - 1.0 - TICK_LENGTH, sy),
            &paint,
        );

        if draw_labels {
            let label = format_tick(value);
            let w = shaper.measure_width(&label, LABEL_SIZE);
            let sx = plot.left - 1.0 - 2.0 * TICK_LENGTH - w;
            shaper.draw_left(canvas, &label, sx, sy + label_h * 0.3, LABEL_SIZE, theme.axis_label);
            x_min_label = x_min_label.min(sx);
        }
    }

    if draw_labels && !axis.label.is_empty() {
        let len = shaper.measure_width(&axis.label, LABEL_SIZE);
        let sx = if x_min_label < f32::MAX { x_min_label / 2.0 } else { plot.left / 3.0 };
        shaper.draw_rotated(canvas, &axis.label, sx, plot.center_y() + len / 2.0, LABEL_SIZE, theme.axis_label);
    }
}

/// Bottom date axis from a calendar plan: ticks, day or month labels, axis
/// label.
fn draw_date_axis(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectF,
    plan: &calendar::DateAxisPlan,
    x: &AxisMapper,
    theme: &Theme,
    draw_labels: bool,
    label_h: f32,
) {
    let paint = solid_paint(theme.axis_line, 1.0);
    let bottom = plot.bottom();
    canvas.draw_line((plot.left - 1.0, bottom), (plot.right() + 1.0, bottom), &paint);

    let mut lowest_label_y = f32::MIN;
    let mut previous_x = plot.left;
    for (index, &tick) in plan.ticks.iter().enumerate() {
        let sx = x.to_screen(tick);
        canvas.draw_line((sx, bottom), (sx, bottom + TICK_LENGTH), &paint);

        if draw_labels {
            match plan.placement {
                LabelPlacement::AtTick => {
                    if let Some(Some(label)) = plan.labels.get(index) {
                        let w = shaper.measure_width(label, LABEL_SIZE);
                        let sy = bottom + 2.0 * TICK_LENGTH + label_h;
                        shaper.draw_left(canvas, label, sx - w / 2.0, sy, LABEL_SIZE, theme.axis_label);
                        lowest_label_y = lowest_label_y.max(sy);
                    }
                }
                LabelPlacement::BetweenTicks => {
                    if index > 0 {
                        if let Some(Some(label)) = plan.labels.get(index - 1) {
                            let w = shaper.measure_width(label, LABEL_SIZE);
                            let center = (sx + previous_x) / 2.0;
                            let sy = bottom + 2.0 * TICK_LENGTH + label_h;
                            shaper.draw_left(canvas, label, center - w / 2.0, sy, LABEL_SIZE, theme.axis_label);
                            lowest_label_y = lowest_label_y.max(sy);
                        }
                    }
                }
            }
        }
        previous_x = sx;
    }

    if draw_labels {
        let sy = if lowest_label_y > f32::MIN {
            lowest_label_y + 2.0 * label_h
        } else {
            bottom + TICK_LENGTH + 2.0 * label_h
        };
        let w = shaper.measure_width(&plan.axis_label, LABEL_SIZE);
        shaper.draw_left_bold(canvas, &plan.axis_label, plot.center_x() - w / 2.0, sy, LABEL_SIZE, theme.axis_label);
    }
}

/// Bottom axis of the annual plot: a boundary tick per 31 December plus the
/// axis start, year labels centered between boundaries.
fn draw_year_axis(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectF,
    plan: &YearAxisPlan,
    x: &AxisMapper,
    axis_label: &str,
    theme: &Theme,
    draw_labels: bool,
    label_h: f32,
) {
    let paint = solid_paint(theme.axis_line, 1.0);
    let bottom = plot.bottom();
    canvas.draw_line((plot.left - 1.0, bottom + 1.0), (plot.right() + 1.0, bottom + 1.0), &paint);

    let mut last_x = plot.left;
    for (index, &boundary) in plan.boundaries.iter().enumerate() {
        let sx = x.to_screen(boundary);
        canvas.draw_line((sx, bottom + 1.0), (sx, bottom + 1.0 + TICK_LENGTH), &paint);

        if index > 0 && draw_labels {
            let label = &plan.year_labels[index - 1];
            let w = shaper.measure_width(label, LABEL_SIZE);
            let sy = bottom + TICK_LENGTH + label_h;
            shaper.draw_left(canvas, label, (last_x + sx) / 2.0 - w / 2.0, sy, LABEL_SIZE, theme.axis_label);
        }
        last_x = sx;
    }

    if draw_labels {
        let sy = bottom + 2.0 * (TICK_LENGTH + label_h);
        let w = shaper.measure_width(axis_label, LABEL_SIZE);
        shaper.draw_left_bold(canvas, axis_label, plot.center_x() - w / 2.0, sy, LABEL_SIZE, theme.axis_label);
    }
}

/// Bottom displacement axis of the route plot. Returns the y coordinate the
/// axis label ends at, so the site labels can hang below it.
#[allow(clippy::too_many_arguments)]
fn draw_displacement_axis(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectF,
    nice: &NiceInterval,
    num_intervals: u32,
    offset: f64,
    x: &AxisMapper,
    axis_label: &str,
    theme: &Theme,
    draw_labels: bool,
    label_h: f32,
) -> f32 {
    let paint = solid_paint(theme.axis_line, 1.0);
    let bottom = plot.bottom();
    canvas.draw_line((plot.left - 1.0, bottom + 1.0), (plot.right() + 1.0, bottom + 1.0), &paint);

    let mut max_label_y = bottom + TICK_LENGTH;
    for tick in 0..=num_intervals {
        let value = offset + f64::from(tick) * nice.interval;
        let sx = x.to_screen(value);
        canvas.draw_line((sx, bottom + 1.0), (sx, bottom + 1.0 + TICK_LENGTH), &paint);

        if draw_labels {
            let label = format_tick(value);
            let w = shaper.measure_width(&label, LABEL_SIZE);
            let sy = bottom + 2.0 * TICK_LENGTH + label_h;
            shaper.draw_left(canvas, &label, sx - w / 2.0, sy, LABEL_SIZE, theme.axis_label);
            max_label_y = max_label_y.max(sy);
        }
    }

    let axis_label_bottom = max_label_y + TICK_LENGTH + label_h;
    if draw_labels {
        let w = shaper.measure_width(axis_label, LABEL_SIZE);
        shaper.draw_left_bold(canvas, axis_label, plot.center_x() - w / 2.0, axis_label_bottom, LABEL_SIZE, theme.axis_label);
    }
    axis_label_bottom
}

/// Rotated site names under the displacement axis, skipping any label that
/// would overlap the previously drawn one.
#[allow(clippy::too_many_arguments)]
fn draw_site_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    sites: &[Site],
    x: &AxisMapper,
    axis_label_bottom: f32,
    label_h: f32,
    measure: &dyn Fn(&str) -> f32,
    theme: &Theme,
    draw_labels: bool,
) {
    let mut last_max_x = f32::MIN;
    for site in sites {
        let sx = x.to_screen(site.displacement);
        let min_x = sx - label_h / 2.0;
        let max_x = sx + label_h / 2.0;
        if min_x > last_max_x {
            if draw_labels {
                let label_w = measure(&site.name);
                let sy = axis_label_bottom + 2.0 * TICK_LENGTH + label_w;
                shaper.draw_rotated(canvas, &site.name, sx, sy, LABEL_SIZE, theme.axis_label);
            }
            last_max_x = max_x;
        }
    }
}

fn legend_entries(series: &[Series], theme: &Theme, symbols: Option<&[Symbol]>) -> Vec<LegendEntry> {
    series
        .iter()
        .enumerate()
        .map(|(index, s)| LegendEntry {
            name: s.name.clone(),
            style: theme.trace_style(index, symbols.map(|syms| syms[index % syms.len()])),
        })
        .collect()
}

/// Stack the plot image above the legend band on one combined surface. Two
/// independent rasters keep the axis math free of legend-height concerns.
fn stack_with_legend(plot: &skia::Image, legend: &skia::Image, theme: &Theme) -> Result<skia::Image> {
    let width = plot.width();
    let total_height = plot.height() + legend.height();
    let mut surface = skia::surfaces::raster_n32_premul((width, total_height))
        .ok_or_else(|| anyhow::anyhow!("failed to create combined surface"))?;
    let canvas = surface.canvas();
    canvas.clear(theme.background);
    canvas.draw_image(plot, (0.0, 0.0), None);
    canvas.draw_image(legend, (0.0, plot.height() as f32), None);
    Ok(surface.image_snapshot())
}

fn encode_png(image: &skia::Image) -> Result<Vec<u8>> {
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_uses_fixed_insets() {
        let r = plot_rect(800, 600, Insets::default());
        assert_eq!(r, RectF::from_ltwh(125.0, 30.0, 610.0, 495.0));
    }

    #[test]
    fn format_tick_drops_trailing_zeroes() {
        assert_eq!(format_tick(40.0), "40");
        assert_eq!(format_tick(2.5), "2.5");
    }
}
