// src/plot_functions/plot_nh4_no3.rs

use plotters::style::RGBColor;

use crate::column_names::{self, layer_label};
use crate::constants::{DEFAULT_NITROGEN_LAYERS, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_input::simulation_output::{LayeredSeries, SimulationOutput};
use crate::error::ChartResult;
use crate::plot_framework::{draw_single_plot, PlotConfig, PlotSeries};
use crate::plot_functions::crop_chart::{column_series, crop_time_series_config};
use crate::run_context::CropRunContext;

/// Color of the n-th line, cycling through the categorical palette.
fn palette_color(index: usize) -> RGBColor {
    let palette = &colorous::CATEGORY10;
    let c = palette[index % palette.len()];
    RGBColor(c.r, c.g, c.b)
}

fn layer_series(
    output: &SimulationOutput,
    series: &LayeredSeries,
    column: &str,
    layer: usize,
    color_index: usize,
) -> ChartResult<PlotSeries> {
    let values: Vec<Option<f64>> = series.layer(layer)?.iter().map(|&v| Some(v)).collect();
    Ok(column_series(
        output.days(),
        &values,
        &layer_label(column, layer),
        &palette_color(color_index),
    ))
}

/// Ammonium then nitrate of each requested layer.
pub fn nh4_no3_plot_config(
    output: &SimulationOutput,
    context: &CropRunContext,
    layers: &[usize],
) -> ChartResult<Option<PlotConfig>> {
    let mut series = Vec::with_capacity(layers.len() * 2);
    for (i, &layer) in layers.iter().enumerate() {
        series.push(layer_series(output, output.nh4(), column_names::NH4, layer, i)?);
    }
    for (i, &layer) in layers.iter().enumerate() {
        series.push(layer_series(
            output,
            output.no3(),
            column_names::NO3,
            layer,
            layers.len() + i,
        )?);
    }
    Ok(crop_time_series_config(
        output.days(),
        context,
        "kg N ha-1 d-1",
        series,
    ))
}

/// Writes `{root_name}_NH4_NO3.png` for the top three soil layers.
pub fn plot_nh4_no3(
    output: &SimulationOutput,
    context: &CropRunContext,
    root_name: &str,
) -> ChartResult<()> {
    plot_nh4_no3_layers(output, context, &DEFAULT_NITROGEN_LAYERS, root_name)
}

pub fn plot_nh4_no3_layers(
    output: &SimulationOutput,
    context: &CropRunContext,
    layers: &[usize],
    root_name: &str,
) -> ChartResult<()> {
    let config = nh4_no3_plot_config(output, context, layers)?;
    draw_single_plot(
        &format!("{root_name}_NH4_NO3.png"),
        (PLOT_WIDTH, PLOT_HEIGHT),
        "Soil NH4/NO3",
        config.as_ref(),
    )
}
