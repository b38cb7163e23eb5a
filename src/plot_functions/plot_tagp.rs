// src/plot_functions/plot_tagp.rs

use crate::constants::{COLOR_TAGP, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_input::simulation_output::{ScalarColumn, SimulationOutput};
use crate::error::ChartResult;
use crate::plot_framework::{draw_single_plot, PlotConfig};
use crate::plot_functions::crop_chart::{column_series, crop_time_series_config};
use crate::run_context::CropRunContext;

/// Total above-ground production over time.
pub fn tagp_plot_config(output: &SimulationOutput, context: &CropRunContext) -> Option<PlotConfig> {
    let days = output.days();
    let series = vec![column_series(
        days,
        output.scalar(ScalarColumn::Tagp),
        "TAGP",
        COLOR_TAGP,
    )];
    crop_time_series_config(days, context, "kg ha-1", series)
}

pub fn plot_tagp(
    output: &SimulationOutput,
    context: &CropRunContext,
    root_name: &str,
) -> ChartResult<()> {
    let config = tagp_plot_config(output, context);
    draw_single_plot(
        &format!("{root_name}_TAGP.png"),
        (PLOT_WIDTH, PLOT_HEIGHT),
        "TAGP",
        config.as_ref(),
    )
}
