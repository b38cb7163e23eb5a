// src/plot_functions/plot_weather_cumsum.rs

use crate::constants::{COLOR_WEATHER_VARIABLE, LINE_WIDTH_WEATHER, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_analysis::cumulative::{cumulative_sum, MissingPolicy};
use crate::data_input::weather::{WeatherTable, WeatherUnits, WeatherVariable};
use crate::error::ChartResult;
use crate::plot_framework::{draw_single_plot, time_series_config, PlotConfig, PlotSeries};

/// Running total of one weather variable over the inclusive date range.
pub fn weather_cumsum_plot_config(
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
    let totals = cumulative_sum(&filtered.column(variable)?, MissingPolicy::default());

    let series = vec![PlotSeries::dated(
        &days,
        &totals,
        format!("Cumulative {variable}"),
        *COLOR_WEATHER_VARIABLE,
    )
    .with_stroke_width(LINE_WIDTH_WEATHER)];

    Ok(time_series_config(
        format!("Cumulative sum of {variable} from {start} to {end}"),
        &days,
        format!("{variable} cumulative sum {unit}"),
        series,
    )
    .map(|mut config| {
        config.legend = None;
        config
    }))
}

/// Writes `{root_name}_{VAR}_cumsum.png`.
pub fn plot_weather_variable_cumsum(
    weather: &WeatherTable,
    var: &str,
    start: &str,
    end: &str,
    units: &WeatherUnits,
    root_name: &str,
) -> ChartResult<()> {
    let config = weather_cumsum_plot_config(weather, var, start, end, units)?;
    draw_single_plot(
        &format!("{root_name}_{}_cumsum.png", var.to_uppercase()),
        (PLOT_WIDTH, PLOT_HEIGHT),
        &format!("Cumulative {var}"),
        config.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::weather::WeatherRecord;
    use crate::error::ChartError;
    use chrono::NaiveDate;

    #[test]
    fn gap_in_rain_is_skipped_not_reset() {
        let d = |n| NaiveDate::from_ymd_opt(2020, 6, n).unwrap();
        let rain = [Some(1.0), None, Some(2.0), Some(0.5)];
        let records = rain
            .iter()
            .enumerate()
            .map(|(i, &r)| WeatherRecord {
                rain: r,
                ..WeatherRecord::on(d(1 + i as u32))
            })
            .collect();
        let weather = WeatherTable::new(records);
        let config = weather_cumsum_plot_config(
            &weather,
            "RAIN",
            "20200601",
            "20200630",
            &WeatherUnits::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(config.series[0].y_values(), vec![1.0, 3.0, 3.5]);
        // the missing day leaves a gap in the line
        assert_eq!(config.series[0].breaks, vec![1]);
        assert_eq!(config.series[0].label, "Cumulative RAIN");
        assert_eq!(config.y_label, "RAIN cumulative sum mm");
    }

    #[test]
    fn missing_unit_is_invalid_input() {
        let weather = WeatherTable::new(Vec::new());
        let result = weather_cumsum_plot_config(
            &weather,
            "WIND",
            "2020-01-01",
            "2020-01-02",
            &WeatherUnits::empty(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn variable_absent_from_table_is_invalid_input() {
        let table = WeatherTable::from_csv_reader("DAY,TMAX\n20200101,5\n".as_bytes()).unwrap();
        let err = weather_cumsum_plot_config(
            &table,
            "RAIN",
            "2020-01-01",
            "2020-01-02",
            &WeatherUnits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(msg) if msg.contains("no RAIN column")));
    }
}
