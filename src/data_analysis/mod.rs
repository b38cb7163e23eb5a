// src/data_analysis/mod.rs

pub mod cumulative;
pub mod date_range;
pub mod moisture_curve;
pub mod soil_profile_geometry;

// src/data_analysis/mod.rs
