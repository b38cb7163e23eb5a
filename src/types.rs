// src/types.rs
// Type aliases shared by the data analysis and plotting layers

use chrono::NaiveDate;

/// One column of a table, missing cells as `None`.
pub type Column = Vec<Option<f64>>;

/// Dated values of a single column, missing cells as `None`.
pub type DatedColumn = Vec<(NaiveDate, Option<f64>)>;

/// Points ready to be handed to the plotting framework (x, y).
pub type SeriesPoints = Vec<(f64, f64)>;

/// Per-layer soil moisture reference levels, in layer order.
pub type LayerValues = Vec<f64>;
