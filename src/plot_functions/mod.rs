// src/plot_functions/mod.rs

pub(crate) mod crop_chart;
pub mod plot_gdd;
pub mod plot_n_rates;
pub mod plot_nh4_no3;
pub mod plot_root_depth;
pub mod plot_sm_dynamic;
pub mod plot_sm_profile;
pub mod plot_tagp;
pub mod plot_weather_cumsum;
pub mod plot_weather_variable;
