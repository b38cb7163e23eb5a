// src/plot_framework.rs

use chrono::NaiveDate;
use log::{info, warn};
use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Polygon, Rectangle, Text};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::ops::Range;

use crate::constants::{
    DASH_PATTERN, DOT_PATTERN, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, LINE_WIDTH_PLOT,
    MARKER_RADIUS,
};
use crate::data_analysis::date_range::{date_to_x, x_to_date};
use crate::error::ChartResult;
use crate::types::SeriesPoints;
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MESSAGE,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Min/max of a set of values, ignoring non-finite ones.
pub fn finite_bounds<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Padded y range covering every point of the given series.
pub fn series_value_range(series: &[PlotSeries]) -> Option<Range<f64>> {
    let (lo, hi) = finite_bounds(series.iter().flat_map(|s| s.data.iter().map(|&(_, y)| y)))?;
    let (lo, hi) = calculate_range(lo, hi);
    Some(lo..hi)
}

/// X range of a date axis. A single day is padded so the range is never empty.
pub fn date_axis_range(dates: &[NaiveDate]) -> Option<Range<f64>> {
    let (first, last) = finite_bounds(dates.iter().map(|&d| date_to_x(d)))?;
    if last - first < 1e-6 {
        let (lo, hi) = calculate_range(first, last);
        Some(lo..hi)
    } else {
        Some(first..last)
    }
}

/// Points of a dated column plus the indices where a new line segment starts
/// because one or more cells before it were missing.
pub fn dated_segments(days: &[NaiveDate], values: &[Option<f64>]) -> (SeriesPoints, Vec<usize>) {
    let mut points = SeriesPoints::new();
    let mut breaks = Vec::new();
    let mut after_gap = false;
    for (&day, value) in days.iter().zip(values) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                if after_gap && !points.is_empty() {
                    breaks.push(points.len());
                }
                after_gap = false;
                points.push((date_to_x(day), v));
            }
            None => after_gap = true,
        }
    }
    (points, breaks)
}

/// Time-series chart spanning `days`, with y padded around every series.
/// `None` when there are no days to plot.
pub fn time_series_config(
    title: impl Into<String>,
    days: &[NaiveDate],
    y_label: impl Into<String>,
    series: Vec<PlotSeries>,
) -> Option<PlotConfig> {
    let x_range = date_axis_range(days)?;
    let y_range = series_value_range(&series).unwrap_or(0.0..1.0);
    let mut config = PlotConfig::time_series(title, x_range, y_range, y_label);
    config.series = series;
    Some(config)
}

/// Tick label for a numeric axis value.
/// Large values get "k"/"M" suffixes; fractional values keep one or two decimals.
pub fn format_axis_value(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1000.0 {
        format!("{:.0}k", y / 1000.0)
    } else if y.fract() != 0.0 {
        if y.abs() < 1.0 {
            format!("{:.2}", y)
        } else {
            format!("{:.1}", y)
        }
    } else {
        format!("{:.0}", y)
    }
}

/// Tick label for a date axis value (days since CE).
pub fn format_date_tick(x: f64) -> String {
    x_to_date(x)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type: &str,
    reason: &str,
) -> ChartResult<()> {
    // Constants for text rendering
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4; // Additional spacing between lines

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable:\n{reason}");

    // Estimate text dimensions for better centering
    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone, Debug)]
pub struct PlotSeries {
    pub data: SeriesPoints,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub line_style: LineStyle,
    pub markers: bool,
    /// Indices into `data` where the line is broken and restarts.
    pub breaks: Vec<usize>,
}

impl PlotSeries {
    /// Solid line with the default stroke width and no markers.
    pub fn line(data: SeriesPoints, label: impl Into<String>, color: RGBColor) -> Self {
        Self {
            data,
            label: label.into(),
            color,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Solid,
            markers: false,
            breaks: Vec::new(),
        }
    }

    /// Line over a dated column, broken wherever cells are missing.
    pub fn dated(
        days: &[NaiveDate],
        values: &[Option<f64>],
        label: impl Into<String>,
        color: RGBColor,
    ) -> Self {
        let (data, breaks) = dated_segments(days, values);
        Self {
            breaks,
            ..Self::line(data, label, color)
        }
    }

    pub fn with_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    pub fn x_values(&self) -> Vec<f64> {
        self.data.iter().map(|&(x, _)| x).collect()
    }

    pub fn y_values(&self) -> Vec<f64> {
        self.data.iter().map(|&(_, y)| y).collect()
    }

    /// Contiguous runs of `data` between breaks; empty runs are left out.
    pub fn segments(&self) -> Vec<&[(f64, f64)]> {
        let mut runs = Vec::with_capacity(self.breaks.len() + 1);
        let mut start = 0;
        for end in self.breaks.iter().copied().chain(std::iter::once(self.data.len())) {
            let end = end.clamp(start, self.data.len());
            if end > start {
                runs.push(&self.data[start..end]);
            }
            start = end;
        }
        runs
    }
}

/// A filled region drawn beneath the series (e.g. plant-available water).
#[derive(Clone, Debug)]
pub struct ShadedBand {
    pub polygon: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub opacity: f64, // 0.0 to 1.0
    pub label: String,
}

impl ShadedBand {
    /// Full-width band between two y values.
    pub fn horizontal(
        y_low: f64,
        y_high: f64,
        x_range: &Range<f64>,
        color: RGBColor,
        opacity: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            polygon: vec![
                (x_range.start, y_low),
                (x_range.end, y_low),
                (x_range.end, y_high),
                (x_range.start, y_high),
            ],
            color,
            opacity,
            label: label.into(),
        }
    }

    /// Region between two x curves sampled at the same y values (left curve
    /// traced downwards, right curve back up).
    pub fn between_x(
        ys: &[f64],
        left: &[f64],
        right: &[f64],
        color: RGBColor,
        opacity: f64,
        label: impl Into<String>,
    ) -> Self {
        let mut polygon: Vec<(f64, f64)> = left.iter().copied().zip(ys.iter().copied()).collect();
        polygon.extend(right.iter().copied().zip(ys.iter().copied()).rev());
        Self {
            polygon,
            color,
            opacity,
            label: label.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A line spanning the whole chart at a fixed x (vertical) or y (horizontal).
#[derive(Clone, Debug)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub position: f64,
    pub label: String,
    pub color: RGBColor,
    pub line_style: LineStyle,
}

impl ReferenceLine {
    pub fn vertical(position: f64, label: impl Into<String>, color: RGBColor) -> Self {
        Self {
            orientation: Orientation::Vertical,
            position,
            label: label.into(),
            color,
            line_style: LineStyle::Dashed,
        }
    }

    pub fn horizontal(position: f64, label: impl Into<String>, color: RGBColor) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::vertical(position, label, color)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Numeric,
    /// Values are days since CE, labelled as dates.
    Date,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerRight,
}

impl LegendPosition {
    fn to_series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: AxisKind,
    /// Draw y growing downwards (depth axes).
    pub invert_y: bool,
    pub bands: Vec<ShadedBand>,
    pub reference_lines: Vec<ReferenceLine>,
    pub legend: Option<LegendPosition>,
}

impl PlotConfig {
    /// Time-series chart over a date axis, legend in the upper left.
    pub fn time_series(
        title: impl Into<String>,
        x_range: Range<f64>,
        y_range: Range<f64>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_range,
            y_range,
            series: Vec::new(),
            x_label: "Date".to_string(),
            y_label: y_label.into(),
            x_axis: AxisKind::Date,
            invert_y: false,
            bands: Vec::new(),
            reference_lines: Vec::new(),
            legend: Some(LegendPosition::UpperLeft),
        }
    }

    /// Adds a vertical line, widening the x range so the line is visible.
    pub fn add_vertical_marker(&mut self, line: ReferenceLine) {
        if line.orientation == Orientation::Vertical && line.position.is_finite() {
            self.x_range.start = self.x_range.start.min(line.position);
            self.x_range.end = self.x_range.end.max(line.position);
        }
        self.reference_lines.push(line);
    }

    pub fn series_by_label(&self, label: &str) -> Option<&PlotSeries> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
    }

    pub fn has_valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }
}

/// Draws a single chart from a PlotConfig onto `area`.
fn draw_chart_with_config(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> ChartResult<()> {
    let invert = plot_config.invert_y;
    let map_y = move |y: f64| if invert { -y } else { y };
    let y_range = if invert {
        -plot_config.y_range.end..-plot_config.y_range.start
    } else {
        plot_config.y_range.clone()
    };
    let (y_lo, y_hi) = (y_range.start, y_range.end);
    let (x_lo, x_hi) = (plot_config.x_range.start, plot_config.x_range.end);

    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(plot_config.x_range.clone(), y_range)?;

    let x_axis = plot_config.x_axis;
    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&|x| match x_axis {
            AxisKind::Date => format_date_tick(*x),
            AxisKind::Numeric => format_axis_value(*x),
        })
        .y_label_formatter(&|y| format_axis_value(map_y(*y)))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;

    // Shaded bands go first so data appears on top
    for band in &plot_config.bands {
        let fill = band.color.mix(band.opacity);
        let points: Vec<(f64, f64)> = band.polygon.iter().map(|&(x, y)| (x, map_y(y))).collect();
        let drawn = chart.draw_series(std::iter::once(Polygon::new(points, fill.filled())))?;
        if !band.label.is_empty() {
            drawn.label(&band.label).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill.filled())
            });
            legend_series_count += 1;
        }
    }

    for line in &plot_config.reference_lines {
        let endpoints = match line.orientation {
            Orientation::Vertical => {
                if line.position < x_lo || line.position > x_hi {
                    continue; // outside the plotted X range
                }
                vec![(line.position, y_lo), (line.position, y_hi)]
            }
            Orientation::Horizontal => {
                let y = map_y(line.position);
                vec![(x_lo, y), (x_hi, y)]
            }
        };
        let style = line.color.stroke_width(LINE_WIDTH_PLOT);
        let drawn = match line.line_style {
            LineStyle::Solid => chart.draw_series(LineSeries::new(endpoints, style))?,
            LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(
                endpoints,
                DASH_PATTERN.0,
                DASH_PATTERN.1,
                style,
            ))?,
            LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(
                endpoints,
                DOT_PATTERN.0,
                DOT_PATTERN.1,
                style,
            ))?,
        };
        if !line.label.is_empty() {
            let color = line.color;
            drawn.label(&line.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let style = s.color.stroke_width(s.stroke_width);
        for (run_index, run) in s.segments().into_iter().enumerate() {
            let points = run.iter().map(|&(x, y)| (x, map_y(y)));
            let drawn = match s.line_style {
                LineStyle::Solid => chart.draw_series(LineSeries::new(points, style))?,
                LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(
                    points,
                    DASH_PATTERN.0,
                    DASH_PATTERN.1,
                    style,
                ))?,
                LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(
                    points,
                    DOT_PATTERN.0,
                    DOT_PATTERN.1,
                    style,
                ))?,
            };
            // one legend entry per series
            if run_index == 0 && !s.label.is_empty() {
                drawn.label(&s.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], s.color.stroke_width(LINE_WIDTH_LEGEND))
                });
                legend_series_count += 1;
            }
        }
        if s.markers {
            let points: Vec<(f64, f64)> = s.data.iter().map(|&(x, y)| (x, map_y(y))).collect();
            chart.draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, MARKER_RADIUS, s.color.filled())),
            )?;
        }
    }

    if let Some(position) = plot_config.legend {
        if legend_series_count > 0 {
            chart
                .configure_series_labels()
                .position(position.to_series_label_position())
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(FONT_TUPLE_LEGEND)
                .draw()?;
        }
    }

    Ok(())
}

/// Renders one chart image. Without usable data a placeholder message is
/// written instead of a chart; that is not an error.
pub fn draw_single_plot(
    output_filename: &str,
    dimensions: (u32, u32),
    plot_type_name: &str,
    plot_config: Option<&PlotConfig>,
) -> ChartResult<()> {
    let root_area = BitMapBackend::new(output_filename, dimensions).into_drawing_area();
    root_area.fill(&WHITE)?;

    let reason = match plot_config {
        Some(config) if config.has_data() && config.has_valid_ranges() => {
            draw_chart_with_config(&root_area, config)?;
            root_area.present()?;
            info!("  Plot saved as '{output_filename}'.");
            return Ok(());
        }
        Some(config) if !config.has_data() => "No data points",
        Some(_) => "Invalid ranges",
        None => "No rows in the selected range",
    };

    draw_unavailable_message(&root_area, plot_type_name, reason)?;
    root_area.present()?;
    warn!("  '{output_filename}' holds only a placeholder: {reason}.");
    Ok(())
}


// src/plot_framework.rs
