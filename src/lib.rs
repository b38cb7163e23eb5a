// src/lib.rs - Library interface for the crop-model charting helpers

pub mod column_names;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;
pub mod run_context;
pub mod types;

pub use data_analysis::moisture_curve::moisture_curves;
pub use error::{ChartError, ChartResult};
pub use plot_functions::plot_gdd::plot_gdd_cumsum;
pub use plot_functions::plot_n_rates::{plot_n_rates, plot_n_rates_cumsum};
pub use plot_functions::plot_nh4_no3::plot_nh4_no3;
pub use plot_functions::plot_root_depth::plot_root_depth;
pub use plot_functions::plot_sm_dynamic::plot_sm_dynamic;
pub use plot_functions::plot_sm_profile::plot_sm_profile;
pub use plot_functions::plot_tagp::plot_tagp;
pub use plot_functions::plot_weather_cumsum::plot_weather_variable_cumsum;
pub use plot_functions::plot_weather_variable::plot_weather_variable;
