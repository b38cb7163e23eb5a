// src/plot_functions/plot_sm_dynamic.rs

use crate::constants::{
    COLOR_AIR_CONTENT, COLOR_FIELD_CAPACITY, COLOR_PLANT_AVAILABLE_WATER, COLOR_SATURATION,
    COLOR_SOIL_MOISTURE, COLOR_WILTING_POINT, PLANT_AVAILABLE_WATER_OPACITY, PLOT_HEIGHT,
    PLOT_WIDTH, SM_AXIS_RANGE,
};
use crate::data_analysis::moisture_curve::SoilReferenceLevels;
use crate::data_input::simulation_output::SimulationOutput;
use crate::data_input::soil_profile::SoilProfileDescription;
use crate::error::ChartResult;
use crate::plot_framework::{
    date_axis_range, draw_single_plot, LegendPosition, PlotConfig, PlotSeries,
    ReferenceLine, ShadedBand,
};

/// Soil moisture of one layer over time, against that layer's field capacity,
/// wilting point, saturation and air content. `None` when the output has no rows.
pub fn sm_dynamic_plot_config(
    soil: &SoilProfileDescription,
    output: &SimulationOutput,
    layer: usize,
    soil_type: &str,
) -> ChartResult<Option<PlotConfig>> {
    let levels = *SoilReferenceLevels::from_profile(soil)?.layer(layer)?;
    let moisture: Vec<Option<f64>> = output.sm().layer(layer)?.iter().map(|&v| Some(v)).collect();

    let Some(x_range) = date_axis_range(output.days()) else {
        return Ok(None);
    };
    let mut config = PlotConfig::time_series(
        format!("Soil Moisture Dynamic in Layer {layer} ({soil_type})"),
        x_range.clone(),
        SM_AXIS_RANGE.0..SM_AXIS_RANGE.1,
        "Soil Moisture (cm³/cm³)",
    );
    config.legend = Some(LegendPosition::UpperRight);
    config.reference_lines = vec![
        ReferenceLine::horizontal(levels.field_capacity, "SM field capacity", *COLOR_FIELD_CAPACITY),
        ReferenceLine::horizontal(levels.wilting_point, "SM wilting point", *COLOR_WILTING_POINT),
        ReferenceLine::horizontal(levels.saturation, "SM saturation", *COLOR_SATURATION),
        ReferenceLine::horizontal(levels.air_content, "SM air content", *COLOR_AIR_CONTENT),
    ];
    config.bands.push(ShadedBand::horizontal(
        levels.wilting_point,
        levels.field_capacity,
        &x_range,
        *COLOR_PLANT_AVAILABLE_WATER,
        PLANT_AVAILABLE_WATER_OPACITY,
        "Plant-Available Water",
    ));
    config.series.push(PlotSeries::dated(
        output.days(),
        &moisture,
        format!("SM layer {layer}"),
        *COLOR_SOIL_MOISTURE,
    ));
    Ok(Some(config))
}

/// Writes `{root_name}_SM_layer_{layer}.png`.
pub fn plot_sm_dynamic(
    soil: &SoilProfileDescription,
    output: &SimulationOutput,
    layer: usize,
    soil_type: &str,
    root_name: &str,
) -> ChartResult<()> {
    let config = sm_dynamic_plot_config(soil, output, layer, soil_type)?;
    draw_single_plot(
        &format!("{root_name}_SM_layer_{layer}.png"),
        (PLOT_WIDTH, PLOT_HEIGHT),
        "Soil moisture dynamic",
        config.as_ref(),
    )
}
