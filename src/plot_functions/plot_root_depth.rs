// src/plot_functions/plot_root_depth.rs

use crate::column_names;
use crate::constants::{COLOR_ROOT_DEPTH, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_input::simulation_output::{ScalarColumn, SimulationOutput};
use crate::error::ChartResult;
use crate::plot_framework::{draw_single_plot, PlotConfig};
use crate::plot_functions::crop_chart::{column_series, crop_time_series_config};
use crate::run_context::CropRunContext;

pub fn root_depth_plot_config(
    output: &SimulationOutput,
    context: &CropRunContext,
) -> Option<PlotConfig> {
    let days = output.days();
    let series = vec![column_series(
        days,
        output.scalar(ScalarColumn::RootDepth),
        column_names::ROOT_DEPTH,
        COLOR_ROOT_DEPTH,
    )];
    crop_time_series_config(days, context, "cm", series)
}

/// Generates the rooting depth chart (`{root_name}_RD.png`).
pub fn plot_root_depth(
    output: &SimulationOutput,
    context: &CropRunContext,
    root_name: &str,
) -> ChartResult<()> {
    let config = root_depth_plot_config(output, context);
    draw_single_plot(
        &format!("{root_name}_RD.png"),
        (PLOT_WIDTH, PLOT_HEIGHT),
        "Root depth",
        config.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::simulation_output::SimulationRecord;
    use chrono::NaiveDate;

    #[test]
    fn missing_depths_are_left_out() {
        let d = |n| NaiveDate::from_ymd_opt(2021, 4, n).unwrap();
        let records = vec![
            SimulationRecord { root_depth: Some(10.0), ..SimulationRecord::on(d(1)) },
            SimulationRecord::on(d(2)),
            SimulationRecord { root_depth: Some(12.5), ..SimulationRecord::on(d(3)) },
        ];
        let output = SimulationOutput::from_records(&records, 0).unwrap();
        let config = root_depth_plot_config(&output, &CropRunContext::new(0.0, d(1))).unwrap();
        assert_eq!(config.series[0].y_values(), vec![10.0, 12.5]);
        assert_eq!(config.y_label, "cm");
    }
}
