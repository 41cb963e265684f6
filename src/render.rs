use std::{ops::Range, path::Path};

use plotters::coord::{
    ranged1d::{DefaultFormatting, KeyPointHint, Ranged},
    types::RangedCoordf64,
    Shift,
};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use thiserror::Error;

use crate::{
    aggregate::{temperature_range, DailyAggregate},
    calendar::MonthAxis,
    config::PlotConfig,
};

/// Both charts span the same days so they can be compared side by side.
pub const DAY_RANGE: Range<f64> = 0.0..366.0;

const DEFAULT_TEMPERATURES: Range<f64> = 0.0..30.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

fn drawing<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(error.to_string())
}

/// How the x axis is labelled.
#[derive(Debug, Clone, Copy)]
pub enum XAxis<'a> {
    DayOfYear,
    Months(&'a MonthAxis),
}

/// Day-of-year axis whose only key points are the month ticks.
struct MonthRange<'a> {
    days: RangedCoordf64,
    months: &'a MonthAxis,
}

impl<'a> MonthRange<'a> {
    fn new(months: &'a MonthAxis) -> Self {
        Self {
            days: DAY_RANGE.into(),
            months,
        }
    }
}

impl Ranged for MonthRange<'_> {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.days.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            return Vec::new();
        }
        self.months.ticks().iter().map(|tick| tick.position).collect()
    }

    fn range(&self) -> Range<f64> {
        self.days.range()
    }
}

/// Observed temperature range padded by 5% on each side.
pub fn y_range(data: &[DailyAggregate]) -> Range<f64> {
    match temperature_range(data) {
        Some(range) => {
            let padding = match (range.end - range.start) * 0.05 {
                p if p > 0.0 => p,
                _ => 1.0,
            };
            range.start - padding..range.end + padding
        }
        None => DEFAULT_TEMPERATURES,
    }
}

/// Render the chart into a PNG file at `path`.
pub fn render_png(
    path: &Path,
    data: &[DailyAggregate],
    trend: &[(f64, f64)],
    axis: XAxis,
    config: &PlotConfig,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, config.pixel_size()).into_drawing_area();
    render(&root, data, trend, axis, config)?;
    root.present().map_err(drawing)?;
    Ok(())
}

/// Draw the chart on any plotters backend.
pub fn render<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &[DailyAggregate],
    trend: &[(f64, f64)],
    axis: XAxis,
    config: &PlotConfig,
) -> Result<(), RenderError> {
    let theme = &config.theme;
    root.fill(&rgb(theme.background)).map_err(drawing)?;

    let y = y_range(data);
    let margin = config.font_pixels(1.5) as u32;
    let label_area = config.font_pixels(4.0) as u32;
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(margin)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area);

    match axis {
        XAxis::DayOfYear => {
            let mut chart = builder
                .build_cartesian_2d(DAY_RANGE, y)
                .map_err(drawing)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .bold_line_style(rgb(theme.separators).mix(0.4))
                .light_line_style(TRANSPARENT)
                .axis_style(rgb(theme.foreground))
                .label_style(font(config, 1.0))
                .axis_desc_style(font(config, 1.2))
                .x_desc("Day of year")
                .y_desc("Temperature (°C)")
                .x_label_formatter(&|day| format!("{day:.0}"))
                .y_label_formatter(&|t| format!("{t:.0}"))
                .draw()
                .map_err(drawing)?;

            draw_data(&mut chart, data, trend, config)?;
        }
        XAxis::Months(months) => {
            let mut chart = builder
                .build_cartesian_2d(MonthRange::new(months), y.clone())
                .map_err(drawing)?;

            // tick marks are drawn by hand below, only at month ends
            chart
                .configure_mesh()
                .disable_x_mesh()
                .bold_line_style(rgb(theme.separators).mix(0.4))
                .light_line_style(TRANSPARENT)
                .axis_style(rgb(theme.foreground))
                .label_style(font(config, 1.0))
                .axis_desc_style(font(config, 1.2))
                .y_desc("Temperature (°C)")
                .x_labels(months.ticks().len())
                .x_label_formatter(&|day| months.label_at(*day).unwrap_or_default().to_string())
                .y_label_formatter(&|t| format!("{t:.0}"))
                .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
                .draw()
                .map_err(drawing)?;

            let stroke = config.font_pixels(0.08).max(1.0) as u32;
            chart
                .draw_series(months.separators().map(|day| {
                    PathElement::new(
                        vec![(day, y.start), (day, y.end)],
                        rgb(theme.separators).stroke_width(stroke),
                    )
                }))
                .map_err(drawing)?;

            // backend_coord is absolute, root may be a sub-area of the backend
            let (base_x, base_y) = root.get_base_pixel();
            let tick_length = config.font_pixels(0.4).round() as i32;
            for tick in months.ticks().iter().filter(|tick| tick.tick_visible) {
                let (x, bottom) = chart.backend_coord(&(tick.position, y.start));
                let (x, bottom) = (x - base_x, bottom - base_y);
                root.draw(&PathElement::new(
                    vec![(x, bottom), (x, bottom + tick_length)],
                    rgb(theme.foreground).stroke_width(stroke),
                ))
                .map_err(drawing)?;
            }

            draw_data(&mut chart, data, trend, config)?;
        }
    }

    Ok(())
}

fn draw_data<DB, X>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, RangedCoordf64>>,
    data: &[DailyAggregate],
    trend: &[(f64, f64)],
    config: &PlotConfig,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    X: Ranged<ValueType = f64>,
{
    let theme = &config.theme;
    let radius = config.font_pixels(0.25).max(1.0) as i32;
    chart
        .draw_series(
            DailyAggregate::points(data)
                .into_iter()
                .map(|point| Circle::new(point, radius, rgb(theme.points).mix(0.7).filled())),
        )
        .map_err(drawing)?;

    if !trend.is_empty() {
        let width = config.font_pixels(0.15).max(1.0) as u32;
        chart
            .draw_series(LineSeries::new(
                trend.iter().copied(),
                rgb(theme.trend).stroke_width(width),
            ))
            .map_err(drawing)?;
    }

    Ok(())
}

fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

fn font(config: &PlotConfig, scale: f64) -> TextStyle<'_> {
    FontDesc::new(
        FontFamily::from(config.theme.font_family.as_str()),
        config.font_pixels(scale),
        FontStyle::Normal,
    )
    .color(&rgb(config.theme.foreground))
}
