// src/column_names.rs

//! Column names of the crop-model output table.
//!
//! Scalar columns hold one value per simulated day; layered columns hold one
//! value per soil layer per day.

pub const DAY: &str = "day";
pub const N_DEMAND: &str = "Ndemand";
pub const RN_UPTAKE: &str = "RNuptake";
pub const RN_FIXATION: &str = "RNfixation";
pub const ROOT_DEPTH: &str = "RD";
pub const TAGP: &str = "TAGP";

pub const NH4: &str = "NH4";
pub const NO3: &str = "NO3";
pub const SM: &str = "SM";

/// All scalar column names, in table order
pub const SCALAR_COLUMNS: [&str; 5] = [N_DEMAND, RN_UPTAKE, RN_FIXATION, ROOT_DEPTH, TAGP];

/// All layered column names, in table order
pub const LAYERED_COLUMNS: [&str; 3] = [NH4, NO3, SM];

/// Legend label for one layer of a layered column, e.g. "NH4 in 0 soil layer".
pub fn layer_label(column: &str, layer: usize) -> String {
    format!("{column} in {layer} soil layer")
}
