// src/plot_functions/plot_gdd.rs

use crate::constants::{COLOR_GDD, LINE_WIDTH_WEATHER, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_analysis::cumulative::{cumulative_gdd, MissingPolicy};
use crate::data_input::weather::{WeatherTable, WeatherVariable};
use crate::error::ChartResult;
use crate::plot_framework::{draw_single_plot, time_series_config, PlotConfig, PlotSeries};

/// Accumulated growing degree days over the inclusive date range. Daily values
/// are `max(0, (tmax + tmin) / 2 - tbase)`.
pub fn gdd_cumsum_plot_config(
    weather: &WeatherTable,
    tmin_col: &str,
    tmax_col: &str,
    tbase: f64,
    start: &str,
    end: &str,
) -> ChartResult<Option<PlotConfig>> {
    let tmin: WeatherVariable = tmin_col.parse()?;
    let tmax: WeatherVariable = tmax_col.parse()?;
    let filtered = weather.filter_date_range(start, end)?;
    let days = filtered.days();
    let gdd = cumulative_gdd(
        &filtered.column(tmax)?,
        &filtered.column(tmin)?,
        tbase,
        MissingPolicy::default(),
    )?;

    let series = vec![PlotSeries::dated(
        &days,
        &gdd,
        format!("Cumulative GDD (Tbase={tbase}°C)"),
        *COLOR_GDD,
    )
    .with_stroke_width(LINE_WIDTH_WEATHER)];

    Ok(time_series_config(
        format!("Cumulative Growing Degree Days from {start} to {end}"),
        &days,
        "Cumulative GDD (°C days)",
        series,
    ))
}

/// Writes `{root_name}_GDD_cumsum.png`.
pub fn plot_gdd_cumsum(
    weather: &WeatherTable,
    tmin_col: &str,
    tmax_col: &str,
    tbase: f64,
    start: &str,
    end: &str,
    root_name: &str,
) -> ChartResult<()> {
    let config = gdd_cumsum_plot_config(weather, tmin_col, tmax_col, tbase, start, end)?;
    draw_single_plot(
        &format!("{root_name}_GDD_cumsum.png"),
        (PLOT_WIDTH, PLOT_HEIGHT),
        "Growing degree days",
        config.as_ref(),
    )
}
