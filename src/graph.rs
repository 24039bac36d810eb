#![cfg(not(tarpaulin_include))]
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::charts::{
    self, BarMode, Bubbles, Cartesian, ChartId, ChartSpec, Donut, Mark, Plot, Series, XAxis,
};
use crate::data::Analytics;
use crate::error::{DashboardError, DashboardResult};
use crate::metrics::format;
use crate::theme;

type Coord2d = Cartesian2d<RangedCoordf64, RangedCoordf64>;
type DrawResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const FONT: &str = "sans-serif";
const MIN_DIMENSION: u32 = 200;
const MAX_DIMENSION: u32 = 2400;
/// Width reserved to the right of bubble charts for the colour bar
const COLOR_BAR_WIDTH: u32 = 110;

/// Output size and decorations of a rendered chart
///
/// # Examples
/// ```
/// use zest_dashboard::graph::RenderOptions;
///
/// let options = RenderOptions { height: 400, ..RenderOptions::default() };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Width of the image in pixels
    pub width: u32,

    /// Height of the image in pixels
    pub height: u32,

    /// Draw the chart title above the plot
    pub show_caption: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            show_caption: true,
        }
    }
}

impl RenderOptions {
    /// Rejects images smaller or larger than the renderer supports
    pub fn validate(&self) -> DashboardResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(DashboardError::InvalidOptions(format!(
                    "{} must be between {} and {} pixels, got {}",
                    name, MIN_DIMENSION, MAX_DIMENSION, value
                )));
            }
        }
        Ok(())
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> DashboardError {
    DashboardError::Render(e.to_string())
}

/// Renders a chart as an SVG document
///
/// # Arguments
/// * `spec` - The chart to draw
/// * `options` - Image size and caption switch
///
/// # Returns
/// * The SVG markup, or a `DashboardError` if the options are out of range
///   or plotting fails
pub fn render_svg(spec: &ChartSpec, options: &RenderOptions) -> DashboardResult<String> {
    options.validate()?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        draw_chart(&root, spec, options).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }

    Ok(svg)
}

/// Renders a chart as a PNG image
///
/// The chart is drawn into an in-memory RGB buffer which is then encoded,
/// so no temporary files are involved.
pub fn render_png(spec: &ChartSpec, options: &RenderOptions) -> DashboardResult<Vec<u8>> {
    options.validate()?;

    let (width, height) = (options.width, options.height);
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_chart(&root, spec, options).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }

    let image = image::RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| DashboardError::Render("pixel buffer has the wrong size".to_string()))?;
    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .map_err(render_error)?;

    Ok(png.into_inner())
}

/// Writes every chart of the dashboard to `dir` as `<chart-id>.svg`
///
/// # Returns
/// * The chart ids and the paths they were written to
pub fn save_all_charts(
    analytics: &Analytics,
    dir: &Path,
    options: &RenderOptions,
) -> DashboardResult<Vec<(ChartId, PathBuf)>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(ChartId::ALL.len());
    for id in ChartId::ALL {
        let svg = render_svg(&charts::build(id, analytics), options)?;
        let path = dir.join(format!("{}.svg", id.slug()));
        std::fs::write(&path, svg)?;
        written.push((id, path));
    }

    Ok(written)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    options: &RenderOptions,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let area = if options.show_caption {
        root.titled(&spec.title, (FONT, 22).into_font().color(&RGBColor::from(theme::DARK)))?
    } else {
        root.clone()
    };

    match &spec.plot {
        Plot::Cartesian(chart) => draw_cartesian(&area, chart),
        Plot::Donut(donut) => draw_donut(&area, donut),
    }
}

fn label_style(size: u32, pos: Pos) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font())
        .color(&BLACK)
        .pos(pos)
}

/// Smallest distance between two neighbouring x positions
fn min_gap(x: &XAxis) -> f64 {
    let mut positions: Vec<f64> = (0..x.len()).map(|i| x.position(i)).collect();
    positions.sort_by(f64::total_cmp);
    let gap = positions
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if gap.is_finite() { gap } else { 1.0 }
}

fn x_range(x: &XAxis, has_bars: bool) -> Range<f64> {
    match x {
        XAxis::Category(labels) => -0.5..(labels.len().max(1) as f64 - 0.5),
        XAxis::Numeric(values) => {
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if !lo.is_finite() || !hi.is_finite() {
                return 0.0..1.0;
            }
            let pad = if has_bars {
                min_gap(x) * 0.6
            } else {
                ((hi - lo) * 0.1).max(0.5)
            };
            lo - pad..hi + pad
        }
    }
}

fn y_range<'s>(series: impl Iterator<Item = &'s Series>, reference: Option<f64>) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut anchor_zero = false;

    for s in series {
        for v in &s.values {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        anchor_zero |= s.mark == Mark::Bar || s.fill;
    }
    if let Some(y) = reference {
        lo = lo.min(y);
        hi = hi.max(y);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }

    if anchor_zero {
        let lo = lo.min(0.0);
        let pad = (hi - lo).max(1.0) * 0.12;
        lo..hi + pad
    } else {
        let pad = ((hi - lo) * 0.15).max(0.5);
        lo - pad..hi + pad
    }
}

fn draw_cartesian<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &Cartesian,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let bubbles = chart.series.iter().find_map(|s| s.bubbles.as_ref());
    let plot_area = match bubbles {
        Some(b) => {
            let (width, _) = area.dim_in_pixel();
            let (plot_area, bar_area) =
                area.split_horizontally(width.saturating_sub(COLOR_BAR_WIDTH) as i32);
            draw_color_bar(&bar_area, b)?;
            plot_area
        }
        None => area.clone(),
    };

    let has_bars = chart.series.iter().any(|s| s.mark == Mark::Bar);
    let x_range = x_range(&chart.x, has_bars);
    let reference = chart.reference.as_ref().map(|r| r.y);
    let y_primary = y_range(chart.series.iter().filter(|s| !s.secondary), reference);

    let mut builder = ChartBuilder::on(&plot_area);
    builder
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(65);
    if chart.y2_label.is_some() {
        builder.right_y_label_area_size(65);
    }
    let mut ctx = builder.build_cartesian_2d(x_range.clone(), y_primary)?;

    let categories = match &chart.x {
        XAxis::Category(labels) => Some(labels.clone()),
        XAxis::Numeric(_) => None,
    };
    let x_formatter = |x: &f64| -> String {
        match &categories {
            Some(labels) => {
                let i = x.round();
                if (x - i).abs() < 1e-6 && i >= 0.0 {
                    labels.get(i as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            }
            None => format::trim((x * 100.0).round() / 100.0),
        }
    };

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(chart.x.len().max(2))
        .x_label_formatter(&x_formatter)
        .x_label_style((FONT, 11))
        .disable_x_mesh()
        .bold_line_style(RGBColor(225, 225, 225))
        .light_line_style(RGBColor::from(theme::LIGHT))
        .draw()?;

    match &chart.y2_label {
        Some(y2_label) => {
            let y_secondary = y_range(chart.series.iter().filter(|s| s.secondary), None);
            let mut dual = ctx.set_secondary_coord(x_range.clone(), y_secondary);
            dual.configure_secondary_axes()
                .y_desc(y2_label.as_str())
                .draw()?;

            draw_primary_series(&mut dual, chart, &x_range)?;
            for s in chart.series.iter().filter(|s| s.secondary) {
                let points = points(&chart.x, s);
                let style = RGBColor::from(s.color).stroke_width(s.width);
                let color = RGBColor::from(s.color);
                let anno = if s.dashed {
                    dual.draw_secondary_series(DashedLineSeries::new(points.clone(), 10, 6, style))?
                } else {
                    dual.draw_secondary_series(LineSeries::new(points.clone(), style))?
                };
                if let Some(name) = &s.name {
                    anno.label(name.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                    });
                }
                dual.draw_secondary_series(
                    points
                        .iter()
                        .map(|p| Circle::new(*p, s.marker_size / 2, color.filled())),
                )?;
            }
            draw_legend(&mut dual, chart)?;
        }
        None => {
            draw_primary_series(&mut ctx, chart, &x_range)?;
            draw_legend(&mut ctx, chart)?;
        }
    }

    Ok(())
}

fn points(x: &XAxis, s: &Series) -> Vec<(f64, f64)> {
    s.values
        .iter()
        .enumerate()
        .map(|(i, v)| (x.position(i), *v))
        .collect()
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    ctx: &mut ChartContext<'a, DB, Coord2d>,
    chart: &Cartesian,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    if chart.series.iter().filter(|s| s.name.is_some()).count() < 2 {
        return Ok(());
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(RGBColor(200, 200, 200))
        .label_font((FONT, 12))
        .draw()?;
    Ok(())
}

fn draw_primary_series<DB: DrawingBackend>(
    ctx: &mut ChartContext<'_, DB, Coord2d>,
    chart: &Cartesian,
    x_range: &Range<f64>,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let bar_count = chart
        .series
        .iter()
        .filter(|s| s.mark == Mark::Bar && !s.secondary)
        .count();
    let slot = match chart.x {
        XAxis::Category(_) => 0.8,
        XAxis::Numeric(_) => min_gap(&chart.x) * 0.8,
    };
    let mut bar_index = 0;

    for s in chart.series.iter().filter(|s| !s.secondary) {
        match s.mark {
            Mark::Bar => {
                let (width, offset) = match chart.bar_mode {
                    BarMode::Group => {
                        let width = slot / bar_count.max(1) as f64;
                        (width, -slot / 2.0 + bar_index as f64 * width)
                    }
                    BarMode::Overlay => (slot, -slot / 2.0),
                };
                bar_index += 1;
                draw_bars(ctx, &chart.x, s, width, offset)?;
            }
            Mark::Line => draw_line(ctx, &chart.x, s)?,
            Mark::Bubble => draw_bubbles(ctx, &chart.x, s)?,
        }
    }

    if let Some(reference) = &chart.reference {
        let color = RGBColor::from(reference.color);
        ctx.draw_series(DashedLineSeries::new(
            vec![(x_range.start, reference.y), (x_range.end, reference.y)],
            8,
            5,
            color.stroke_width(2),
        ))?;
        ctx.draw_series(std::iter::once(
            EmptyElement::at((x_range.end, reference.y))
                + Text::new(
                    reference.label.clone(),
                    (-4, -4),
                    label_style(12, Pos::new(HPos::Right, VPos::Bottom)),
                ),
        ))?;
    }

    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    ctx: &mut ChartContext<'_, DB, Coord2d>,
    x: &XAxis,
    s: &Series,
    width: f64,
    offset: f64,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let color = RGBColor::from(s.color);
    let fill = color.mix(s.opacity).filled();
    let bars: Vec<_> = points(x, s)
        .into_iter()
        .map(|(px, v)| Rectangle::new([(px + offset, 0.0), (px + offset + width, v)], fill))
        .collect();

    let anno = ctx.draw_series(bars)?;
    if let Some(name) = &s.name {
        anno.label(name.as_str()).legend(move |(x, y)| {
            Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
        });
    }

    if !s.labels.is_empty() {
        let style = label_style(11, Pos::new(HPos::Center, VPos::Bottom));
        ctx.draw_series(points(x, s).into_iter().zip(&s.labels).map(|((px, v), text)| {
            EmptyElement::at((px + offset + width / 2.0, v))
                + Text::new(text.clone(), (0, -3), style.clone())
        }))?;
    }

    Ok(())
}

fn draw_line<DB: DrawingBackend>(
    ctx: &mut ChartContext<'_, DB, Coord2d>,
    x: &XAxis,
    s: &Series,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let color = RGBColor::from(s.color);
    let style = color.stroke_width(s.width);
    let points = points(x, s);

    if s.fill {
        ctx.draw_series(AreaSeries::new(points.clone(), 0.0, color.mix(0.2)))?;
    }

    let anno = if s.dashed {
        ctx.draw_series(DashedLineSeries::new(points.clone(), 10, 6, style))?
    } else {
        ctx.draw_series(LineSeries::new(points.clone(), style))?
    };
    if let Some(name) = &s.name {
        anno.label(name.as_str()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
        });
    }

    ctx.draw_series(
        points
            .iter()
            .map(|p| Circle::new(*p, s.marker_size / 2, color.filled())),
    )?;

    if !s.labels.is_empty() {
        let style = label_style(12, Pos::new(HPos::Center, VPos::Bottom));
        let lift = (s.marker_size / 2 + 4) as i32;
        ctx.draw_series(points.iter().zip(&s.labels).map(|(p, text)| {
            EmptyElement::at(*p) + Text::new(text.clone(), (0, -lift), style.clone())
        }))?;
    }

    Ok(())
}

fn draw_bubbles<DB: DrawingBackend>(
    ctx: &mut ChartContext<'_, DB, Coord2d>,
    x: &XAxis,
    s: &Series,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let Some(bubbles) = &s.bubbles else {
        return Ok(());
    };
    let colors = bubbles.scale.map(&bubbles.color_values);
    let points = points(x, s);
    let radii: Vec<i32> = bubbles
        .sizes
        .iter()
        .map(|d| ((d / 2.0).round() as i32).max(3))
        .collect();

    ctx.draw_series(points.iter().zip(&radii).zip(&colors).map(|((p, r), c)| {
        Circle::new(
            *p,
            *r,
            ShapeStyle {
                color: RGBColor::from(*c).mix(0.85),
                filled: true,
                stroke_width: 1,
            },
        )
    }))?;

    let style = label_style(11, Pos::new(HPos::Center, VPos::Bottom));
    ctx.draw_series(
        points
            .iter()
            .zip(&radii)
            .zip(&s.labels)
            .map(|((p, r), text)| {
                EmptyElement::at(*p) + Text::new(text.clone(), (0, -(r + 3)), style.clone())
            }),
    )?;

    Ok(())
}

fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bubbles: &Bubbles,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let (_, height) = area.dim_in_pixel();
    let (left, right) = (12, 32);
    let top = 50;
    let bottom = (height as i32 - 60).max(top + 20);
    let steps = 40;

    for i in 0..steps {
        let t = i as f64 / (steps - 1) as f64;
        let y0 = bottom - (bottom - top) * i / steps;
        let y1 = bottom - (bottom - top) * (i + 1) / steps;
        let color = RGBColor::from(bubbles.scale.at(t));
        area.draw(&Rectangle::new([(left, y1), (right, y0)], color.filled()))?;
    }

    let lo = bubbles.color_values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = bubbles.color_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        let style = label_style(11, Pos::new(HPos::Left, VPos::Center));
        area.draw(&Text::new(format::trim(hi), (right + 4, top), style.clone()))?;
        area.draw(&Text::new(format::trim(lo), (right + 4, bottom), style))?;
    }

    area.draw(&Text::new(
        bubbles.color_title.clone(),
        (left - 6, top - 24),
        label_style(11, Pos::new(HPos::Left, VPos::Bottom)),
    ))?;

    Ok(())
}

fn draw_donut<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, donut: &Donut) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let total: f64 = donut.slices.iter().map(|s| s.value).sum();
    if total <= 0.0 {
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let (pie_area, legend_area) = area.split_horizontally((width * 2 / 3) as i32);
    let (pie_width, _) = pie_area.dim_in_pixel();

    let center = (pie_width as f64 / 2.0, height as f64 / 2.0);
    let outer = pie_width.min(height) as f64 * 0.4;
    let inner = outer * donut.hole.clamp(0.0, 0.95);
    let at = |radius: f64, angle: f64| -> (i32, i32) {
        (
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 + radius * angle.sin()).round() as i32,
        )
    };

    let label = label_style(13, Pos::new(HPos::Center, VPos::Center));
    let mut start = -PI / 2.0;
    for slice in &donut.slices {
        let sweep = slice.value / total * 2.0 * PI;
        let steps = ((sweep * 40.0).ceil() as usize).max(2);
        let angles: Vec<f64> = (0..=steps)
            .map(|k| start + sweep * k as f64 / steps as f64)
            .collect();

        let mut outline: Vec<(i32, i32)> = angles.iter().map(|a| at(outer, *a)).collect();
        outline.extend(angles.iter().rev().map(|a| at(inner, *a)));
        pie_area.draw(&Polygon::new(outline, RGBColor::from(slice.color).filled()))?;

        let share = slice.value / total * 100.0;
        pie_area.draw(&Text::new(
            format!("{:.1}%", share),
            at((outer + inner) / 2.0, start + sweep / 2.0),
            label.clone(),
        ))?;

        start += sweep;
    }

    let entry = label_style(13, Pos::new(HPos::Left, VPos::Center));
    for (i, slice) in donut.slices.iter().enumerate() {
        let y = 40 + i as i32 * 26;
        legend_area.draw(&Rectangle::new(
            [(10, y - 7), (24, y + 7)],
            RGBColor::from(slice.color).filled(),
        ))?;
        legend_area.draw(&Text::new(slice.label.clone(), (32, y), entry.clone()))?;
    }

    Ok(())
}
