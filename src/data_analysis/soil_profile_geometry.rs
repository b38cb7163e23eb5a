// src/data_analysis/soil_profile_geometry.rs

use crate::data_analysis::moisture_curve::SoilReferenceLevels;
use crate::error::{ChartError, ChartResult};
use crate::types::LayerValues;

/// Depth of each layer's midpoint, followed by the total profile depth.
///
/// The result has one more entry than there are layers so that profiles can be
/// drawn down to the bottom boundary.
pub fn layer_midpoints(thicknesses: &[f64]) -> ChartResult<Vec<f64>> {
    if thicknesses.is_empty() {
        return Err(ChartError::invalid("cannot compute midpoints of an empty profile"));
    }
    let mut depth_above = 0.0;
    let mut midpoints = Vec::with_capacity(thicknesses.len() + 1);
    for &thickness in thicknesses {
        midpoints.push(depth_above + thickness / 2.0);
        depth_above += thickness;
    }
    midpoints.push(depth_above);
    Ok(midpoints)
}

/// Appends a copy of the last value, aligning a per-layer series with [`layer_midpoints`].
pub fn close_series(values: &[f64]) -> ChartResult<Vec<f64>> {
    let last = *values
        .last()
        .ok_or_else(|| ChartError::invalid("cannot close an empty profile series"))?;
    let mut closed = values.to_vec();
    closed.push(last);
    Ok(closed)
}

/// Every series of a soil moisture profile plot, each `layers + 1` long.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedProfile {
    pub depths: LayerValues,
    pub field_capacity: LayerValues,
    pub wilting_point: LayerValues,
    pub saturation: LayerValues,
    pub air_content: LayerValues,
    pub moisture: LayerValues,
}

impl ClosedProfile {
    /// `moisture` is the instantaneous per-layer soil moisture and must have one
    /// value per layer.
    pub fn new(
        thicknesses: &[f64],
        levels: &SoilReferenceLevels,
        moisture: &[f64],
    ) -> ChartResult<Self> {
        if levels.len() != thicknesses.len() || moisture.len() != thicknesses.len() {
            return Err(ChartError::invalid(format!(
                "profile has {} layers but {} reference levels and {} moisture values",
                thicknesses.len(),
                levels.len(),
                moisture.len()
            )));
        }
        Ok(Self {
            depths: layer_midpoints(thicknesses)?,
            field_capacity: close_series(&levels.field_capacity())?,
            wilting_point: close_series(&levels.wilting_point())?,
            saturation: close_series(&levels.saturation())?,
            air_content: close_series(&levels.air_content())?,
            moisture: close_series(moisture)?,
        })
    }

    pub fn total_depth(&self) -> f64 {
        self.depths.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::soil_profile::{SoilLayerDescription, SoilProfileDescription};
    use approx::assert_relative_eq;

    #[test]
    fn midpoints_of_single_layer() {
        assert_eq!(layer_midpoints(&[20.0]).unwrap(), vec![10.0, 20.0]);
    }

    #[test]
    fn midpoints_are_layers_plus_one_and_increasing() {
        let thicknesses = [10.0, 20.0, 30.0, 5.0];
        let midpoints = layer_midpoints(&thicknesses).unwrap();
        assert_eq!(midpoints.len(), thicknesses.len() + 1);
        assert_eq!(midpoints, vec![5.0, 20.0, 45.0, 62.5, 65.0]);
        assert!(midpoints.windows(2).all(|w| w[1] > w[0]));
        assert!(layer_midpoints(&[]).is_err());
    }

    #[test]
    fn closing_duplicates_last_value() {
        assert_eq!(close_series(&[0.3, 0.2]).unwrap(), vec![0.3, 0.2, 0.2]);
        assert!(matches!(close_series(&[]), Err(ChartError::InvalidInput(_))));
    }

    #[test]
    fn closed_profile_end_to_end() {
        let profile = SoilProfileDescription::new(vec![SoilLayerDescription::new(
            20.0,
            vec![-1.0, 0.45, 2.0, 0.30, 4.2, 0.15],
        )]);
        let levels = SoilReferenceLevels::from_profile(&profile).unwrap();
        let closed =
            ClosedProfile::new(&profile.thicknesses().unwrap(), &levels, &[0.25]).unwrap();
        assert_eq!(closed.depths, vec![10.0, 20.0]);
        assert_eq!(closed.field_capacity, vec![0.30, 0.30]);
        assert_eq!(closed.wilting_point, vec![0.15, 0.15]);
        assert_eq!(closed.saturation, vec![0.45, 0.45]);
        assert_relative_eq!(closed.air_content[0], 0.13, epsilon = 1e-12);
        assert_eq!(closed.air_content[0], closed.air_content[1]);
        assert_eq!(closed.moisture, vec![0.25, 0.25]);
        assert_eq!(closed.total_depth(), 20.0);
    }

    #[test]
    fn moisture_width_must_match_layers() {
        let profile = SoilProfileDescription::new(vec![SoilLayerDescription::new(
            20.0,
            vec![-1.0, 0.45, 2.0, 0.30, 4.2, 0.15],
        )]);
        let levels = SoilReferenceLevels::from_profile(&profile).unwrap();
        assert!(ClosedProfile::new(&[20.0], &levels, &[0.2, 0.3]).is_err());
    }
}
