// src/data_input/simulation_output.rs

use std::str::FromStr;

use chrono::NaiveDate;
use ndarray::{Array2, ArrayView1};

use crate::column_names;
use crate::error::{ChartError, ChartResult};
use crate::types::Column;

/// One simulated day of crop-model output.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    pub day: NaiveDate,
    pub n_demand: Option<f64>,    // Crop N demand [kg N ha-1 d-1]
    pub rn_uptake: Option<f64>,   // N uptake rate [kg N ha-1 d-1]
    pub rn_fixation: Option<f64>, // N fixation rate [kg N ha-1 d-1]
    pub root_depth: Option<f64>,  // Rooting depth [cm]
    pub tagp: Option<f64>,        // Total above-ground production [kg ha-1]
    pub nh4: Vec<f64>,            // Ammonium per soil layer
    pub no3: Vec<f64>,            // Nitrate per soil layer
    pub sm: Vec<f64>,             // Volumetric soil moisture per soil layer
}

impl SimulationRecord {
    /// A record for `day` with every column missing.
    pub fn on(day: NaiveDate) -> Self {
        Self {
            day,
            n_demand: None,
            rn_uptake: None,
            rn_fixation: None,
            root_depth: None,
            tagp: None,
            nh4: Vec::new(),
            no3: Vec::new(),
            sm: Vec::new(),
        }
    }
}

/// Scalar (one value per day) columns of the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarColumn {
    NDemand,
    RnUptake,
    RnFixation,
    RootDepth,
    Tagp,
}

impl ScalarColumn {
    pub fn name(self) -> &'static str {
        match self {
            ScalarColumn::NDemand => column_names::N_DEMAND,
            ScalarColumn::RnUptake => column_names::RN_UPTAKE,
            ScalarColumn::RnFixation => column_names::RN_FIXATION,
            ScalarColumn::RootDepth => column_names::ROOT_DEPTH,
            ScalarColumn::Tagp => column_names::TAGP,
        }
    }
}

impl FromStr for ScalarColumn {
    type Err = ChartError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            column_names::N_DEMAND => Ok(ScalarColumn::NDemand),
            column_names::RN_UPTAKE => Ok(ScalarColumn::RnUptake),
            column_names::RN_FIXATION => Ok(ScalarColumn::RnFixation),
            column_names::ROOT_DEPTH => Ok(ScalarColumn::RootDepth),
            column_names::TAGP => Ok(ScalarColumn::Tagp),
            other => Err(ChartError::invalid(format!(
                "unknown simulation column '{other}', expected one of {:?}",
                column_names::SCALAR_COLUMNS
            ))),
        }
    }
}

/// Days × layers matrix for per-layer columns (NH4, NO3, SM).
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredSeries {
    values: Array2<f64>,
}

impl LayeredSeries {
    /// Every row must hold exactly `layers` values.
    pub fn from_rows(rows: &[&[f64]], layers: usize, column: &str) -> ChartResult<Self> {
        if let Some((day, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != layers) {
            return Err(ChartError::invalid(format!(
                "{column} on row {day} has {} values, expected one per soil layer ({layers})",
                row.len()
            )));
        }
        let flat: Vec<f64> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        let values = Array2::from_shape_vec((rows.len(), layers), flat)
            .map_err(|e| ChartError::invalid(format!("{column}: {e}")))?;
        Ok(Self { values })
    }

    pub fn layer_count(&self) -> usize {
        self.values.ncols()
    }

    pub fn day_count(&self) -> usize {
        self.values.nrows()
    }

    /// Time series of one layer.
    pub fn layer(&self, index: usize) -> ChartResult<ArrayView1<'_, f64>> {
        if index >= self.layer_count() {
            return Err(ChartError::IndexOutOfRange {
                what: "Soil layer",
                index,
                len: self.layer_count(),
            });
        }
        Ok(self.values.column(index))
    }

    /// Profile of all layers on one day (row index).
    pub fn day(&self, index: usize) -> ChartResult<ArrayView1<'_, f64>> {
        if index >= self.day_count() {
            return Err(ChartError::IndexOutOfRange {
                what: "Time",
                index,
                len: self.day_count(),
            });
        }
        Ok(self.values.row(index))
    }
}

/// Crop-model output table, one row per simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    days: Vec<NaiveDate>,
    n_demand: Column,
    rn_uptake: Column,
    rn_fixation: Column,
    root_depth: Column,
    tagp: Column,
    nh4: LayeredSeries,
    no3: LayeredSeries,
    sm: LayeredSeries,
}

impl SimulationOutput {
    /// Builds the table from daily records; every layered cell must hold
    /// `layers` values.
    pub fn from_records(records: &[SimulationRecord], layers: usize) -> ChartResult<Self> {
        let scalar = |get: fn(&SimulationRecord) -> Option<f64>| -> Column {
            records.iter().map(get).collect()
        };
        let nh4: Vec<&[f64]> = records.iter().map(|r| r.nh4.as_slice()).collect();
        let no3: Vec<&[f64]> = records.iter().map(|r| r.no3.as_slice()).collect();
        let sm: Vec<&[f64]> = records.iter().map(|r| r.sm.as_slice()).collect();
        Ok(Self {
            days: records.iter().map(|r| r.day).collect(),
            n_demand: scalar(|r| r.n_demand),
            rn_uptake: scalar(|r| r.rn_uptake),
            rn_fixation: scalar(|r| r.rn_fixation),
            root_depth: scalar(|r| r.root_depth),
            tagp: scalar(|r| r.tagp),
            nh4: LayeredSeries::from_rows(&nh4, layers, column_names::NH4)?,
            no3: LayeredSeries::from_rows(&no3, layers, column_names::NO3)?,
            sm: LayeredSeries::from_rows(&sm, layers, column_names::SM)?,
        })
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn layer_count(&self) -> usize {
        self.sm.layer_count()
    }

    pub fn scalar(&self, column: ScalarColumn) -> &[Option<f64>] {
        match column {
            ScalarColumn::NDemand => &self.n_demand,
            ScalarColumn::RnUptake => &self.rn_uptake,
            ScalarColumn::RnFixation => &self.rn_fixation,
            ScalarColumn::RootDepth => &self.root_depth,
            ScalarColumn::Tagp => &self.tagp,
        }
    }

    /// Scalar column by table name, e.g. `"RNuptake"`.
    pub fn column(&self, name: &str) -> ChartResult<&[Option<f64>]> {
        Ok(self.scalar(name.parse()?))
    }

    /// Layered column by table name: `"NH4"`, `"NO3"` or `"SM"`.
    pub fn layered(&self, name: &str) -> ChartResult<&LayeredSeries> {
        match name {
            column_names::NH4 => Ok(&self.nh4),
            column_names::NO3 => Ok(&self.no3),
            column_names::SM => Ok(&self.sm),
            other => Err(ChartError::invalid(format!(
                "unknown layered column '{other}', expected one of {:?}",
                column_names::LAYERED_COLUMNS
            ))),
        }
    }

    pub fn nh4(&self) -> &LayeredSeries {
        &self.nh4
    }

    pub fn no3(&self) -> &LayeredSeries {
        &self.no3
    }

    pub fn sm(&self) -> &LayeredSeries {
        &self.sm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 4, d).unwrap()
    }

    fn record(d: u32, sm: Vec<f64>) -> SimulationRecord {
        SimulationRecord {
            rn_uptake: Some(d as f64),
            nh4: vec![1.0; sm.len()],
            no3: vec![2.0; sm.len()],
            sm,
            ..SimulationRecord::on(day(d))
        }
    }

    #[test]
    fn builds_columns_from_records() {
        let records = vec![record(1, vec![0.3, 0.2]), record(2, vec![0.28, 0.21])];
        let output = SimulationOutput::from_records(&records, 2).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.days(), &[day(1), day(2)]);
        assert_eq!(output.column("RNuptake").unwrap(), &[Some(1.0), Some(2.0)]);
        assert_eq!(output.column("TAGP").unwrap(), &[None, None]);
        assert_eq!(output.sm().layer(1).unwrap().to_vec(), vec![0.2, 0.21]);
        assert_eq!(output.sm().day(1).unwrap().to_vec(), vec![0.28, 0.21]);
        assert_eq!(output.layered("NO3").unwrap().layer_count(), 2);
    }

    #[test]
    fn ragged_layer_rows_are_rejected() {
        let mut bad = record(2, vec![0.28, 0.21]);
        bad.nh4 = vec![1.0];
        let records = vec![record(1, vec![0.3, 0.2]), bad];
        assert!(matches!(
            SimulationOutput::from_records(&records, 2),
            Err(ChartError::InvalidInput(msg)) if msg.contains("NH4")
        ));
    }

    #[test]
    fn unknown_column_names_are_invalid_input() {
        let output = SimulationOutput::from_records(&[record(1, vec![0.3])], 1).unwrap();
        assert!(matches!(output.column("LAI"), Err(ChartError::InvalidInput(_))));
        assert!(matches!(output.layered("K"), Err(ChartError::InvalidInput(_))));
    }

    #[test]
    fn out_of_range_layer_and_day_are_reported() {
        let output = SimulationOutput::from_records(&[record(1, vec![0.3, 0.2, 0.1])], 3).unwrap();
        assert!(matches!(
            output.nh4().layer(3),
            Err(ChartError::IndexOutOfRange { index: 3, len: 3, .. })
        ));
        assert!(matches!(
            output.sm().day(1),
            Err(ChartError::IndexOutOfRange { what: "Time", index: 1, len: 1 })
        ));
    }

    #[test]
    fn empty_output_keeps_layer_width() {
        let output = SimulationOutput::from_records(&[], 3).unwrap();
        assert!(output.is_empty());
        assert_eq!(output.layer_count(), 3);
    }
}
