// src/data_analysis/moisture_curve.rs

use log::debug;

use crate::constants::{AIR_CONTENT_OFFSET, PF_FIELD_CAPACITY, PF_SATURATION, PF_WILTING_POINT};
use crate::data_input::soil_profile::SoilProfileDescription;
use crate::error::{ChartError, ChartResult};
use crate::types::LayerValues;

/// One layer's retention curve as ordered (pF, SM) rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MoistureCurve {
    rows: Vec<(f64, f64)>,
}

impl MoistureCurve {
    /// Builds the curve from the flattened `pF, SM, pF, SM, ...` sequence.
    /// Input order is kept; an odd-length sequence is rejected.
    pub fn from_flat_pairs(flat: &[f64]) -> ChartResult<Self> {
        if flat.len() % 2 != 0 {
            return Err(ChartError::invalid(format!(
                "SMfromPF must hold pF/SM pairs, got {} values",
                flat.len()
            )));
        }
        let rows = flat.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[(f64, f64)] {
        &self.rows
    }

    /// Moisture content at exactly this pF. There is no interpolation: a pF
    /// absent from the curve fails with `NotFound`.
    pub fn moisture_at(&self, pf: f64) -> ChartResult<f64> {
        self.rows
            .iter()
            .find(|(key, _)| *key == pf)
            .map(|&(_, sm)| sm)
            .ok_or(ChartError::NotFound { pf })
    }

    pub fn field_capacity(&self) -> ChartResult<f64> {
        self.moisture_at(PF_FIELD_CAPACITY)
    }

    pub fn wilting_point(&self) -> ChartResult<f64> {
        self.moisture_at(PF_WILTING_POINT)
    }

    pub fn saturation(&self) -> ChartResult<f64> {
        self.moisture_at(PF_SATURATION)
    }
}

/// Air content level: wilting point minus 0.02.
pub fn air_content(wilting_point: f64) -> f64 {
    wilting_point - AIR_CONTENT_OFFSET
}

/// Builds one curve per layer, in profile order.
pub fn moisture_curves(profile: &SoilProfileDescription) -> ChartResult<Vec<MoistureCurve>> {
    profile
        .layers
        .iter()
        .map(|layer| MoistureCurve::from_flat_pairs(&layer.sm_from_pf))
        .collect()
}

/// Reference moisture levels of a single layer [cm³/cm³].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerLevels {
    pub field_capacity: f64,
    pub wilting_point: f64,
    pub saturation: f64,
    pub air_content: f64,
}

impl LayerLevels {
    pub fn from_curve(curve: &MoistureCurve) -> ChartResult<Self> {
        let wilting_point = curve.wilting_point()?;
        Ok(Self {
            field_capacity: curve.field_capacity()?,
            wilting_point,
            saturation: curve.saturation()?,
            air_content: air_content(wilting_point),
        })
    }
}

/// Reference levels for every layer of a profile. Curves are built once and
/// shared by all four lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilReferenceLevels {
    layers: Vec<LayerLevels>,
}

impl SoilReferenceLevels {
    pub fn from_profile(profile: &SoilProfileDescription) -> ChartResult<Self> {
        let curves = moisture_curves(profile)?;
        let layers = curves
            .iter()
            .map(LayerLevels::from_curve)
            .collect::<ChartResult<Vec<_>>>()?;
        debug!("Derived reference moisture levels for {} layers", layers.len());
        Ok(Self { layers })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> ChartResult<&LayerLevels> {
        self.layers.get(index).ok_or(ChartError::IndexOutOfRange {
            what: "Soil layer",
            index,
            len: self.layers.len(),
        })
    }

    pub fn field_capacity(&self) -> LayerValues {
        self.layers.iter().map(|l| l.field_capacity).collect()
    }

    pub fn wilting_point(&self) -> LayerValues {
        self.layers.iter().map(|l| l.wilting_point).collect()
    }

    pub fn saturation(&self) -> LayerValues {
        self.layers.iter().map(|l| l.saturation).collect()
    }

    pub fn air_content(&self) -> LayerValues {
        self.layers.iter().map(|l| l.air_content).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::soil_profile::SoilLayerDescription;
    use approx::assert_relative_eq;

    #[test]
    fn pairs_keep_input_order() {
        let curve = MoistureCurve::from_flat_pairs(&[4.2, 0.15, -1.0, 0.45, 2.0, 0.30]).unwrap();
        assert_eq!(curve.rows(), &[(4.2, 0.15), (-1.0, 0.45), (2.0, 0.30)]);
        assert!(MoistureCurve::from_flat_pairs(&[]).unwrap().rows().is_empty());
    }

    #[test]
    fn odd_length_is_invalid_input() {
        assert!(matches!(
            MoistureCurve::from_flat_pairs(&[2.0, 0.3, 4.2]),
            Err(ChartError::InvalidInput(_))
        ));
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let curve = MoistureCurve::from_flat_pairs(&[1.0, 0.40, 2.0, 0.30, 4.2, 0.15]).unwrap();
        assert_eq!(curve.moisture_at(2.0).unwrap(), 0.30);
        assert!(matches!(
            curve.moisture_at(2.1),
            Err(ChartError::NotFound { pf }) if pf == 2.1
        ));
        assert!(curve.moisture_at(2.0 + 1e-12).is_err());
    }

    #[test]
    fn first_matching_row_wins() {
        let curve = MoistureCurve::from_flat_pairs(&[2.0, 0.31, 2.0, 0.29]).unwrap();
        assert_eq!(curve.field_capacity().unwrap(), 0.31);
    }

    #[test]
    fn air_content_is_wilting_point_minus_offset() {
        assert_relative_eq!(air_content(0.15), 0.13, epsilon = 1e-12);
        for wp in [0.0, 0.05, 0.2, 0.33] {
            assert_eq!(air_content(wp), wp - 0.02);
        }
    }

    #[test]
    fn profile_levels_for_single_layer() {
        let profile = SoilProfileDescription::new(vec![SoilLayerDescription::new(
            20.0,
            vec![-1.0, 0.45, 2.0, 0.30, 4.2, 0.15],
        )]);
        let levels = SoilReferenceLevels::from_profile(&profile).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels.field_capacity(), vec![0.30]);
        assert_eq!(levels.wilting_point(), vec![0.15]);
        assert_eq!(levels.saturation(), vec![0.45]);
        assert_relative_eq!(levels.air_content()[0], 0.13, epsilon = 1e-12);
        assert!(levels.layer(1).is_err());
    }

    #[test]
    fn missing_reference_key_fails_the_profile() {
        let profile = SoilProfileDescription::new(vec![SoilLayerDescription::new(
            20.0,
            vec![-1.0, 0.45, 2.5, 0.30, 4.2, 0.15],
        )]);
        assert!(matches!(
            SoilReferenceLevels::from_profile(&profile),
            Err(ChartError::NotFound { pf }) if pf == 2.0
        ));
    }
}
