// src/plot_functions/plot_weather_variable.rs

use crate::constants::{COLOR_WEATHER_VARIABLE, LINE_WIDTH_WEATHER, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_input::weather::{WeatherTable, WeatherUnits, WeatherVariable};
use crate::error::ChartResult;
use crate::plot_framework::{draw_single_plot, time_series_config, PlotConfig, PlotSeries};

/// Daily values of one weather variable between `start` and `end`, inclusive.
///
/// `var` is a column name such as `"TMAX"`; its unit comes from `units`.
/// Returns `Ok(None)` when no rows fall inside the range.
pub fn weather_variable_plot_config(
    weather: &WeatherTable,
    var: &str,
    start: &str,
    end: &str,
    units: &WeatherUnits,
) -> ChartResult<Option<PlotConfig>> {
    let variable: WeatherVariable = var.parse()?;
    let unit = units.unit(variable)?;
    let filtered = weather.filter_date_range(start, end)?;
    let days = filtered.days();

    let series = vec![PlotSeries::dated(
        &days,
        &filtered.column(variable)?,
        variable.name(),
        *COLOR_WEATHER_VARIABLE,
    )
    .with_stroke_width(LINE_WIDTH_WEATHER)];

    Ok(time_series_config(
        format!("{variable} from {start} to {end}"),
        &days,
        format!("{variable} {unit}"),
        series,
    )
    .map(|mut config| {
        config.legend = None;
        config
    }))
}

/// Writes `{root_name}_{VAR}.png`.
pub fn plot_weather_variable(
    weather: &WeatherTable,
    var: &str,
    start: &str,
    end: &str,
    units: &WeatherUnits,
    root_name: &str,
) -> ChartResult<()> {
    let config = weather_variable_plot_config(weather, var, start, end, units)?;
    draw_single_plot(
        &format!("{root_name}_{}.png", var.to_uppercase()),
        (PLOT_WIDTH, PLOT_HEIGHT),
        var,
        config.as_ref(),
    )
}
