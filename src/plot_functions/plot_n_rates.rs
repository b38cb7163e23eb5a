// src/plot_functions/plot_n_rates.rs

use chrono::NaiveDate;

use crate::constants::{
    COLOR_N_DEMAND, COLOR_N_FIXATION, COLOR_N_UPTAKE, COLOR_N_UPTAKE_PLUS_FIXATION, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::data_analysis::cumulative::{cumulative_sum, sum_columns, MissingPolicy};
use crate::data_input::simulation_output::{ScalarColumn, SimulationOutput};
use crate::error::ChartResult;
use crate::plot_framework::{draw_single_plot, LineStyle, PlotConfig, PlotSeries};
use crate::plot_functions::crop_chart::{column_series, crop_time_series_config};
use crate::run_context::CropRunContext;

pub const LABEL_N_DEMAND: &str = "Ndemand";
pub const LABEL_N_UPTAKE: &str = "RNuptake";
pub const LABEL_N_FIXATION: &str = "RNfixation";
pub const LABEL_N_UPTAKE_PLUS_FIXATION: &str = "RNuptake + RNfixation";

pub const LABEL_N_DEMAND_CUMSUM: &str = "Ndemand.cumsum()";
pub const LABEL_N_UPTAKE_CUMSUM: &str = "RNuptake.cumsum()";
pub const LABEL_N_FIXATION_CUMSUM: &str = "RNfixation.cumsum()";
pub const LABEL_N_UPTAKE_PLUS_FIXATION_CUMSUM: &str = "RNuptake.cumsum() + RNfixation.cumsum()";

/// Demand, uptake, fixation and uptake + fixation lines, in that order.
/// Uptake is dashed and the combined line dotted black.
fn nitrogen_series(
    days: &[NaiveDate],
    columns: [&[Option<f64>]; 4],
    labels: [&str; 4],
) -> Vec<PlotSeries> {
    let [demand, uptake, fixation, combined] = columns;
    vec![
        column_series(days, demand, labels[0], COLOR_N_DEMAND),
        column_series(days, uptake, labels[1], COLOR_N_UPTAKE).with_style(LineStyle::Dashed),
        column_series(days, fixation, labels[2], COLOR_N_FIXATION),
        column_series(days, combined, labels[3], COLOR_N_UPTAKE_PLUS_FIXATION)
            .with_style(LineStyle::Dotted),
    ]
}

/// Daily nitrogen demand, uptake, fixation and uptake + fixation.
/// `None` when the output holds no days.
pub fn n_rates_plot_config(
    output: &SimulationOutput,
    context: &CropRunContext,
) -> ChartResult<Option<PlotConfig>> {
    let days = output.days();
    let uptake = output.scalar(ScalarColumn::RnUptake);
    let fixation = output.scalar(ScalarColumn::RnFixation);
    let combined = sum_columns(uptake, fixation)?;

    let series = nitrogen_series(
        days,
        [output.scalar(ScalarColumn::NDemand), uptake, fixation, &combined],
        [LABEL_N_DEMAND, LABEL_N_UPTAKE, LABEL_N_FIXATION, LABEL_N_UPTAKE_PLUS_FIXATION],
    );
    Ok(crop_time_series_config(days, context, "kg N ha-1 d-1", series))
}

/// Running totals of the nitrogen rates. The combined line is the sum of the
/// two cumulative series, not the cumulative sum of the daily combination.
pub fn n_rates_cumsum_plot_config(
    output: &SimulationOutput,
    context: &CropRunContext,
) -> ChartResult<Option<PlotConfig>> {
    let policy = MissingPolicy::default();
    let days = output.days();
    let demand = cumulative_sum(output.scalar(ScalarColumn::NDemand), policy);
    let uptake = cumulative_sum(output.scalar(ScalarColumn::RnUptake), policy);
    let fixation = cumulative_sum(output.scalar(ScalarColumn::RnFixation), policy);
    let combined = sum_columns(&uptake, &fixation)?;

    let series = nitrogen_series(
        days,
        [&demand, &uptake, &fixation, &combined],
        [
            LABEL_N_DEMAND_CUMSUM,
            LABEL_N_UPTAKE_CUMSUM,
            LABEL_N_FIXATION_CUMSUM,
            LABEL_N_UPTAKE_PLUS_FIXATION_CUMSUM,
        ],
    );
    Ok(crop_time_series_config(days, context, "kg N ha-1", series))
}

/// Writes `{root_name}_N_rates.png`.
pub fn plot_n_rates(
    output: &SimulationOutput,
    context: &CropRunContext,
    root_name: &str,
) -> ChartResult<()> {
    let config = n_rates_plot_config(output, context)?;
    draw_single_plot(
        &format!("{root_name}_N_rates.png"),
        (PLOT_WIDTH, PLOT_HEIGHT),
        "Nitrogen rates",
        config.as_ref(),
    )
}

/// Writes `{root_name}_N_rates_cumsum.png`.
pub fn plot_n_rates_cumsum(
    output: &SimulationOutput,
    context: &CropRunContext,
    root_name: &str,
) -> ChartResult<()> {
    let config = n_rates_cumsum_plot_config(output, context)?;
    draw_single_plot(
        &format!("{root_name}_N_rates_cumsum.png"),
        (PLOT_WIDTH, PLOT_HEIGHT),
        "Cumulative nitrogen",
        config.as_ref(),
    )
}
