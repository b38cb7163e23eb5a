// src/data_input/mod.rs

pub mod simulation_output;
pub mod soil_profile;
pub mod weather;
