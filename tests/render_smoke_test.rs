// tests/render_smoke_test.rs

use chrono::NaiveDate;
use tempfile::TempDir;

use wofost_charts::data_input::simulation_output::{SimulationOutput, SimulationRecord};
use wofost_charts::data_input::soil_profile::{SoilLayerDescription, SoilProfileDescription};
use wofost_charts::data_input::weather::{WeatherTable, WeatherUnits};
use wofost_charts::run_context::CropRunContext;
use wofost_charts::{
    plot_gdd_cumsum, plot_n_rates, plot_n_rates_cumsum, plot_nh4_no3, plot_root_depth,
    plot_sm_dynamic, plot_sm_profile, plot_tagp, plot_weather_variable,
    plot_weather_variable_cumsum, ChartError, ChartResult,
};

fn soil() -> SoilProfileDescription {
    let curve = vec![-1.0, 0.45, 2.0, 0.30, 4.2, 0.15];
    SoilProfileDescription::new(
        [10.0, 20.0, 30.0]
            .iter()
            .map(|&t| SoilLayerDescription::new(t, curve.clone()))
            .collect(),
    )
}

fn output() -> SimulationOutput {
    let records: Vec<SimulationRecord> = (0..10u32)
        .map(|i| {
            let x = i as f64;
            SimulationRecord {
                n_demand: Some(1.0 + x * 0.1),
                rn_uptake: Some(0.8 + x * 0.05),
                rn_fixation: Some(0.2),
                root_depth: Some(10.0 + x * 2.0),
                tagp: Some(x * 150.0),
                nh4: vec![5.0 - x * 0.1, 4.0, 3.0],
                no3: vec![20.0 - x, 15.0, 10.0],
                sm: vec![0.32 - x * 0.01, 0.30, 0.28],
                ..SimulationRecord::on(NaiveDate::from_ymd_opt(2022, 4, 1 + i).unwrap())
            }
        })
        .collect();
    SimulationOutput::from_records(&records, 3).unwrap()
}

fn weather() -> WeatherTable {
    let csv = "DAY,TMAX,TMIN,RAIN\n\
               20220401,14,3,0.0\n\
               20220402,16,5,4.2\n\
               20220403,18,8,\n\
               20220404,12,2,1.1\n";
    WeatherTable::from_csv_reader(csv.as_bytes()).unwrap()
}

/// True for backend errors raised while loading a font for text.
fn is_font_failure(msg: &str) -> bool {
    msg.to_ascii_lowercase().contains("font")
}

/// Runs a renderer and checks the image landed. Hosts without any system font
/// cannot draw text; only that failure is tolerated, every other error fails.
fn check_rendered(result: ChartResult<()>, path: &std::path::Path) {
    match result {
        Ok(()) => assert!(path.exists(), "{} was not written", path.display()),
        Err(ChartError::Render(msg)) if is_font_failure(&msg) => {
            eprintln!("skipping {}: no usable font: {msg}", path.display())
        }
        Err(other) => panic!("unexpected error for {}: {other}", path.display()),
    }
}

#[test]
fn every_chart_writes_a_png() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("run");
    let root_name = root.to_str().unwrap();
    let at = |suffix: &str| dir.path().join(format!("run_{suffix}.png"));

    let output = output();
    let weather = weather();
    let soil = soil();
    let units = WeatherUnits::default();
    let context = CropRunContext::new(0.5, NaiveDate::from_ymd_opt(2022, 4, 2).unwrap());

    check_rendered(plot_n_rates(&output, &context, root_name), &at("N_rates"));
    check_rendered(plot_n_rates_cumsum(&output, &context, root_name), &at("N_rates_cumsum"));
    check_rendered(plot_root_depth(&output, &context, root_name), &at("RD"));
    check_rendered(plot_nh4_no3(&output, &context, root_name), &at("NH4_NO3"));
    check_rendered(plot_tagp(&output, &context, root_name), &at("TAGP"));
    check_rendered(plot_sm_profile(&soil, &output, 4, root_name), &at("SM_profile_4"));
    check_rendered(plot_sm_dynamic(&soil, &output, 1, "loam", root_name), &at("SM_layer_1"));
    check_rendered(
        plot_weather_variable(&weather, "TMAX", "2022-04-01", "2022-04-04", &units, root_name),
        &at("TMAX"),
    );
    check_rendered(
        plot_weather_variable_cumsum(&weather, "RAIN", "2022-04-01", "2022-04-04", &units, root_name),
        &at("RAIN_cumsum"),
    );
    check_rendered(
        plot_gdd_cumsum(&weather, "TMIN", "TMAX", 5.0, "2022-04-01", "2022-04-04", root_name),
        &at("GDD_cumsum"),
    );
}

#[test]
fn empty_range_writes_placeholder() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("empty");
    let result = plot_weather_variable(
        &weather(),
        "TMAX",
        "2030-01-01",
        "2030-12-31",
        &WeatherUnits::default(),
        root.to_str().unwrap(),
    );
    check_rendered(result, &dir.path().join("empty_TMAX.png"));
}

#[test]
fn invalid_input_fails_before_rendering() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("bad");
    let err = plot_sm_profile(&soil(), &output(), 99, root.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ChartError::IndexOutOfRange { what: "Time", index: 99, len: 10 }));
    assert!(!dir.path().join("bad_SM_profile_99.png").exists());
}

#[test]
fn only_font_failures_are_tolerated() {
    assert!(is_font_failure("Drawing backend error: Font loading error: no font found"));
    assert!(!is_font_failure("Drawing backend error: No such file or directory"));
}
