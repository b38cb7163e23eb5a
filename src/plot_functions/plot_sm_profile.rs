// src/plot_functions/plot_sm_profile.rs

use crate::constants::{
    COLOR_AIR_CONTENT, COLOR_FIELD_CAPACITY, COLOR_PLANT_AVAILABLE_WATER, COLOR_SATURATION,
    COLOR_SOIL_MOISTURE, COLOR_WILTING_POINT, PLANT_AVAILABLE_WATER_OPACITY,
    PROFILE_MIN_DEPTH_CM, PROFILE_PLOT_HEIGHT, PROFILE_PLOT_WIDTH,
};
use crate::data_analysis::moisture_curve::SoilReferenceLevels;
use crate::data_analysis::soil_profile_geometry::ClosedProfile;
use crate::data_input::simulation_output::SimulationOutput;
use crate::data_input::soil_profile::SoilProfileDescription;
use crate::error::ChartResult;
use crate::plot_framework::{
    calculate_range, draw_single_plot, finite_bounds, AxisKind, LegendPosition, LineStyle,
    PlotConfig, PlotSeries, ShadedBand,
};
use log::debug;
use plotters::style::RGBColor;

pub const LABEL_FIELD_CAPACITY: &str = "Soil Moisture at field capacity";
pub const LABEL_WILTING_POINT: &str = "Soil Moisture at wilting point";
pub const LABEL_SATURATION: &str = "Soil Moisture at saturation";
pub const LABEL_AIR_CONTENT: &str = "Soil Air Content";
pub const LABEL_PLANT_AVAILABLE_WATER: &str = "Plant-Available Water";

fn profile_line(values: &[f64], depths: &[f64], label: &str, color: &RGBColor) -> PlotSeries {
    let data = values.iter().copied().zip(depths.iter().copied()).collect();
    PlotSeries::line(data, label, *color).with_markers()
}

/// Soil moisture profile at row `time` of the output, drawn against layer
/// midpoint depths together with the reference levels of every layer.
///
/// Fails with `IndexOutOfRange` when `time` is past the last row and with
/// `InvalidInput` when the output's layer count differs from the profile's.
pub fn sm_profile_plot_config(
    soil: &SoilProfileDescription,
    output: &SimulationOutput,
    time: usize,
) -> ChartResult<PlotConfig> {
    let moisture = output.sm().day(time)?.to_vec();
    let levels = SoilReferenceLevels::from_profile(soil)?;
    let thicknesses = soil.thicknesses()?;
    let profile = ClosedProfile::new(&thicknesses, &levels, &moisture)?;
    let depths = &profile.depths;

    let series = vec![
        profile_line(&profile.field_capacity, depths, LABEL_FIELD_CAPACITY, COLOR_FIELD_CAPACITY)
            .with_style(LineStyle::Dashed),
        profile_line(&profile.wilting_point, depths, LABEL_WILTING_POINT, COLOR_WILTING_POINT)
            .with_style(LineStyle::Dashed),
        profile_line(&profile.saturation, depths, LABEL_SATURATION, COLOR_SATURATION)
            .with_style(LineStyle::Dashed),
        profile_line(&profile.air_content, depths, LABEL_AIR_CONTENT, COLOR_AIR_CONTENT)
            .with_style(LineStyle::Dashed),
        profile_line(
            &profile.moisture,
            depths,
            &format!("Soil Moisture Profile - Time {time}"),
            COLOR_SOIL_MOISTURE,
        ),
    ];
    let band = ShadedBand::between_x(
        depths,
        &profile.field_capacity,
        &profile.wilting_point,
        *COLOR_PLANT_AVAILABLE_WATER,
        PLANT_AVAILABLE_WATER_OPACITY,
        LABEL_PLANT_AVAILABLE_WATER,
    );

    let (sm_lo, sm_hi) = finite_bounds(series.iter().flat_map(|s| s.x_values()))
        .map(|(lo, hi)| calculate_range(lo, hi))
        .unwrap_or((0.0, 1.0));
    let max_depth = profile.total_depth().max(PROFILE_MIN_DEPTH_CM);
    debug!("Soil moisture profile at time {time}: {} layers, axis to {max_depth} cm", thicknesses.len());

    Ok(PlotConfig {
        title: format!("Soil Moisture Profile - Time {time}"),
        x_range: sm_lo..sm_hi,
        y_range: 0.0..max_depth,
        series,
        x_label: "Soil Moisture (cm³/cm³)".to_string(),
        y_label: "Depth (cm)".to_string(),
        x_axis: AxisKind::Numeric,
        invert_y: true,
        bands: vec![band],
        reference_lines: Vec::new(),
        legend: Some(LegendPosition::LowerRight),
    })
}

/// Writes `{root_name}_SM_profile_{time}.png`.
pub fn plot_sm_profile(
    soil: &SoilProfileDescription,
    output: &SimulationOutput,
    time: usize,
    root_name: &str,
) -> ChartResult<()> {
    let config = sm_profile_plot_config(soil, output, time)?;
    draw_single_plot(
        &format!("{root_name}_SM_profile_{time}.png"),
        (PROFILE_PLOT_WIDTH, PROFILE_PLOT_HEIGHT),
        "Soil moisture profile",
        Some(&config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::simulation_output::SimulationRecord;
    use crate::data_input::soil_profile::SoilLayerDescription;
    use crate::error::ChartError;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn soil() -> SoilProfileDescription {
        let curve = vec![-1.0, 0.45, 2.0, 0.30, 4.2, 0.15];
        SoilProfileDescription::new(vec![
            SoilLayerDescription::new(10.0, curve.clone()),
            SoilLayerDescription::new(20.0, curve),
        ])
    }

    fn output(sm: &[Vec<f64>]) -> SimulationOutput {
        let records: Vec<SimulationRecord> = sm
            .iter()
            .enumerate()
            .map(|(i, values)| SimulationRecord {
                sm: values.clone(),
                nh4: vec![0.0; values.len()],
                no3: vec![0.0; values.len()],
                ..SimulationRecord::on(NaiveDate::from_ymd_opt(2021, 1, 1 + i as u32).unwrap())
            })
            .collect();
        SimulationOutput::from_records(&records, sm[0].len()).unwrap()
    }

    #[test]
    fn profile_series_are_closed_against_midpoints() {
        let config =
            sm_profile_plot_config(&soil(), &output(&[vec![0.2, 0.25], vec![0.22, 0.27]]), 1)
                .unwrap();
        let fc = config.series_by_label(LABEL_FIELD_CAPACITY).unwrap();
        assert_eq!(fc.data, vec![(0.30, 5.0), (0.30, 20.0), (0.30, 30.0)]);
        let air = config.series_by_label(LABEL_AIR_CONTENT).unwrap();
        for x in air.x_values() {
            assert_relative_eq!(x, 0.13, epsilon = 1e-12);
        }
        let moisture = config.series_by_label("Soil Moisture Profile - Time 1").unwrap();
        assert_eq!(moisture.x_values(), vec![0.22, 0.27, 0.27]);
        assert!(config.invert_y);
        assert_eq!(config.y_range, 0.0..PROFILE_MIN_DEPTH_CM);
        assert_eq!(config.bands[0].polygon.len(), 6);
    }

    #[test]
    fn time_past_last_row_is_rejected() {
        let err = sm_profile_plot_config(&soil(), &output(&[vec![0.2, 0.25]]), 1).unwrap_err();
        assert!(matches!(err, ChartError::IndexOutOfRange { index: 1, len: 1, .. }));
    }

    #[test]
    fn moisture_width_must_match_layers() {
        let err = sm_profile_plot_config(&soil(), &output(&[vec![0.2, 0.25, 0.3]]), 0).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }
}
