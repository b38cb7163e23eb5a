// src/data_input/soil_profile.rs

use serde::Deserialize;

use crate::error::{ChartError, ChartResult};

/// Top-level soil document as written by the crop model: `{"SoilProfileDescription": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SoilDocument {
    #[serde(rename = "SoilProfileDescription")]
    pub profile: SoilProfileDescription,
}

/// Ordered soil layers, top to bottom.
#[derive(Debug, Clone, Deserialize)]
pub struct SoilProfileDescription {
    #[serde(rename = "SoilLayers")]
    pub layers: Vec<SoilLayerDescription>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoilLayerDescription {
    /// Layer thickness [cm]
    #[serde(rename = "Thickness")]
    pub thickness: f64,
    /// Retention curve flattened as pF, SM, pF, SM, ...
    #[serde(rename = "SMfromPF")]
    pub sm_from_pf: Vec<f64>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

impl SoilLayerDescription {
    pub fn new(thickness: f64, sm_from_pf: Vec<f64>) -> Self {
        Self {
            thickness,
            sm_from_pf,
            name: None,
        }
    }
}

impl SoilProfileDescription {
    pub fn new(layers: Vec<SoilLayerDescription>) -> Self {
        Self { layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer thicknesses in profile order. Fails on an empty profile or a
    /// thickness that is not a finite positive number.
    pub fn thicknesses(&self) -> ChartResult<Vec<f64>> {
        if self.layers.is_empty() {
            return Err(ChartError::invalid("soil profile has no layers"));
        }
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                if layer.thickness.is_finite() && layer.thickness > 0.0 {
                    Ok(layer.thickness)
                } else {
                    Err(ChartError::invalid(format!(
                        "layer {i} has invalid thickness {}",
                        layer.thickness
                    )))
                }
            })
            .collect()
    }

    pub fn layer(&self, index: usize) -> ChartResult<&SoilLayerDescription> {
        self.layers.get(index).ok_or(ChartError::IndexOutOfRange {
            what: "Soil layer",
            index,
            len: self.layers.len(),
        })
    }
}
