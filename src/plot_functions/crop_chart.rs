// src/plot_functions/crop_chart.rs

use chrono::NaiveDate;

use crate::constants::COLOR_SOWING_DATE;
use crate::data_analysis::date_range::date_to_x;
use crate::plot_framework::{time_series_config, PlotConfig, PlotSeries, ReferenceLine};
use crate::run_context::CropRunContext;
use plotters::style::RGBColor;

/// Line of one dated column of the simulation output, broken at missing days.
pub(crate) fn column_series(
    days: &[NaiveDate],
    values: &[Option<f64>],
    label: &str,
    color: &RGBColor,
) -> PlotSeries {
    PlotSeries::dated(days, values, label, *color)
}

/// Time-series chart titled after the run, with the sowing date marked.
pub(crate) fn crop_time_series_config(
    days: &[NaiveDate],
    context: &CropRunContext,
    y_label: &str,
    series: Vec<PlotSeries>,
) -> Option<PlotConfig> {
    let mut config = time_series_config(context.chart_title(), days, y_label, series)?;
    config.add_vertical_marker(ReferenceLine::vertical(
        date_to_x(context.sowing_date),
        "Sowing date",
        *COLOR_SOWING_DATE,
    ));
    Some(config)
}
