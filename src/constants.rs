// src/constants.rs

use plotters::style::colors::full_palette::{GREEN, LIGHTBLUE, ORANGE, RED};
use plotters::style::colors::{BLACK, BLUE};
use plotters::style::RGBColor;

// Plot dimensions (10x5 and 8x6 inch figures at 150 dpi).
pub const PLOT_WIDTH: u32 = 1500;
pub const PLOT_HEIGHT: u32 = 750;
pub const PROFILE_PLOT_WIDTH: u32 = 1200;
pub const PROFILE_PLOT_HEIGHT: u32 = 900;

// Label used in nitrogen chart titles.
pub const DEFAULT_MODEL_LABEL: &str = "Wofost81_NWLP_MLWB_SNOMIN";

// --- Soil moisture reference levels ---
// Pressure heads (pF) looked up by exact match in each layer's SMfromPF curve.
pub const PF_FIELD_CAPACITY: f64 = 2.0;
pub const PF_WILTING_POINT: f64 = 4.2;
pub const PF_SATURATION: f64 = -1.0;
// Air content is the wilting point minus this volumetric fraction.
pub const AIR_CONTENT_OFFSET: f64 = 0.02;

// Depth axis of the profile plot reaches at least this far [cm].
pub const PROFILE_MIN_DEPTH_CM: f64 = 100.0;
// Soil moisture axis of the dynamic plot [cm³/cm³].
pub const SM_AXIS_RANGE: (f64, f64) = (0.0, 1.0);

// Layers drawn by the NH4/NO3 plot unless the caller asks for others.
pub const DEFAULT_NITROGEN_LAYERS: [usize; 3] = [0, 1, 2];

// --- Plot Color Assignments ---
pub const COLOR_N_DEMAND: &RGBColor = &RED;
pub const COLOR_N_UPTAKE: &RGBColor = &BLUE;
pub const COLOR_N_FIXATION: &RGBColor = &GREEN;
pub const COLOR_N_UPTAKE_PLUS_FIXATION: &RGBColor = &BLACK;
pub const COLOR_ROOT_DEPTH: &RGBColor = &RED;
pub const COLOR_TAGP: &RGBColor = &GREEN;
pub const COLOR_SOWING_DATE: &RGBColor = &RED;

pub const COLOR_FIELD_CAPACITY: &RGBColor = &RED;
pub const COLOR_WILTING_POINT: &RGBColor = &BLUE;
pub const COLOR_SATURATION: &RGBColor = &GREEN;
pub const COLOR_AIR_CONTENT: &RGBColor = &ORANGE;
pub const COLOR_SOIL_MOISTURE: &RGBColor = &BLACK;
pub const COLOR_PLANT_AVAILABLE_WATER: &RGBColor = &LIGHTBLUE;
pub const PLANT_AVAILABLE_WATER_OPACITY: f64 = 0.5;

pub const COLOR_WEATHER_VARIABLE: &RGBColor = &RED;
pub const COLOR_GDD: &RGBColor = &GREEN;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_WEATHER: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const MARKER_RADIUS: u32 = 3;

// Dash pattern in pixels: (dash length, gap length)
pub const DASH_PATTERN: (u32, u32) = (8, 5);
pub const DOT_PATTERN: (u32, u32) = (2, 4);

// Font sizes
pub const FONT_SIZE_CHART_TITLE: i32 = 24;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 15;
pub const FONT_SIZE_MESSAGE: i32 = 22;

// src/constants.rs
