// src/data_input/weather.rs

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::debug;

use crate::data_analysis::date_range::{filter_date_range, parse_date, DateIndexed};
use crate::error::{ChartError, ChartResult};
use crate::types::{Column, DatedColumn};

/// Name of the date column in weather tables.
pub const DAY_COLUMN: &str = "DAY";

/// Weather variables recognised by the weather charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherVariable {
    Tmax,
    Tmin,
    Vap,
    Wind,
    Rain,
    Irrad,
    SnowDepth,
}

impl WeatherVariable {
    pub const ALL: [WeatherVariable; 7] = [
        WeatherVariable::Tmax,
        WeatherVariable::Tmin,
        WeatherVariable::Vap,
        WeatherVariable::Wind,
        WeatherVariable::Rain,
        WeatherVariable::Irrad,
        WeatherVariable::SnowDepth,
    ];

    /// Column name as used in the weather table.
    pub fn name(self) -> &'static str {
        match self {
            WeatherVariable::Tmax => "TMAX",
            WeatherVariable::Tmin => "TMIN",
            WeatherVariable::Vap => "VAP",
            WeatherVariable::Wind => "WIND",
            WeatherVariable::Rain => "RAIN",
            WeatherVariable::Irrad => "IRRAD",
            WeatherVariable::SnowDepth => "SNOWDEPTH",
        }
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeatherVariable {
    type Err = ChartError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let upper = name.trim().to_ascii_uppercase();
        WeatherVariable::ALL
            .into_iter()
            .find(|var| var.name() == upper)
            .ok_or_else(|| {
                ChartError::invalid(format!(
                    "unknown weather variable '{name}', expected one of TMAX, TMIN, VAP, WIND, RAIN, IRRAD, SNOWDEPTH"
                ))
            })
    }
}

/// Display unit of each weather variable, owned by the caller and handed to the
/// weather charts.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherUnits {
    units: HashMap<WeatherVariable, String>,
}

impl Default for WeatherUnits {
    fn default() -> Self {
        let units = [
            (WeatherVariable::Tmax, "°C"),
            (WeatherVariable::Tmin, "°C"),
            (WeatherVariable::Vap, "kPa"),
            (WeatherVariable::Wind, "m/s"),
            (WeatherVariable::Rain, "mm"),
            (WeatherVariable::Irrad, "kJ/m²"),
            (WeatherVariable::SnowDepth, "cm"),
        ]
        .into_iter()
        .map(|(var, unit)| (var, unit.to_string()))
        .collect();
        Self { units }
    }
}

impl WeatherUnits {
    /// A table with no units configured.
    pub fn empty() -> Self {
        Self {
            units: HashMap::new(),
        }
    }

    pub fn with_unit(mut self, var: WeatherVariable, unit: impl Into<String>) -> Self {
        self.units.insert(var, unit.into());
        self
    }

    pub fn unit(&self, var: WeatherVariable) -> ChartResult<&str> {
        self.units
            .get(&var)
            .map(String::as_str)
            .ok_or_else(|| ChartError::invalid(format!("no display unit configured for {var}")))
    }

    /// Unit by variable name; unknown names fail with `InvalidInput`.
    pub fn unit_for_name(&self, name: &str) -> ChartResult<&str> {
        self.unit(name.parse()?)
    }
}

/// One day of weather-station data. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub day: NaiveDate,
    pub tmax: Option<f64>,      // [°C]
    pub tmin: Option<f64>,      // [°C]
    pub vap: Option<f64>,       // [kPa]
    pub wind: Option<f64>,      // [m/s]
    pub rain: Option<f64>,      // [mm]
    pub irrad: Option<f64>,     // [kJ/m²]
    pub snowdepth: Option<f64>, // [cm]
}

impl WeatherRecord {
    /// A record for `day` with every variable missing.
    pub fn on(day: NaiveDate) -> Self {
        Self {
            day,
            tmax: None,
            tmin: None,
            vap: None,
            wind: None,
            rain: None,
            irrad: None,
            snowdepth: None,
        }
    }

    pub fn value(&self, var: WeatherVariable) -> Option<f64> {
        match var {
            WeatherVariable::Tmax => self.tmax,
            WeatherVariable::Tmin => self.tmin,
            WeatherVariable::Vap => self.vap,
            WeatherVariable::Wind => self.wind,
            WeatherVariable::Rain => self.rain,
            WeatherVariable::Irrad => self.irrad,
            WeatherVariable::SnowDepth => self.snowdepth,
        }
    }

    fn value_mut(&mut self, var: WeatherVariable) -> &mut Option<f64> {
        match var {
            WeatherVariable::Tmax => &mut self.tmax,
            WeatherVariable::Tmin => &mut self.tmin,
            WeatherVariable::Vap => &mut self.vap,
            WeatherVariable::Wind => &mut self.wind,
            WeatherVariable::Rain => &mut self.rain,
            WeatherVariable::Irrad => &mut self.irrad,
            WeatherVariable::SnowDepth => &mut self.snowdepth,
        }
    }
}

impl DateIndexed for WeatherRecord {
    fn date(&self) -> NaiveDate {
        self.day
    }
}

/// Weather table, rows ordered by date. Only the variables in `columns` can
/// be read back; the rest were never part of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherTable {
    records: Vec<WeatherRecord>,
    columns: Vec<WeatherVariable>,
}

impl WeatherTable {
    /// Table built from records, with every weather variable present.
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Self::with_columns(records, WeatherVariable::ALL.to_vec())
    }

    pub fn with_columns(records: Vec<WeatherRecord>, columns: Vec<WeatherVariable>) -> Self {
        Self { records, columns }
    }

    /// Reads already-loaded CSV text with a `DAY` column (`YYYYMMDD` or
    /// `YYYY-MM-DD`) and any of the weather variable columns. Empty cells
    /// become missing values; an unparseable day or value fails.
    pub fn from_csv_reader<R: Read>(reader: R) -> ChartResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let header_record = reader.headers()?.clone();

        let day_index = header_record
            .iter()
            .position(|h| h.eq_ignore_ascii_case(DAY_COLUMN))
            .ok_or_else(|| ChartError::invalid("weather table has no DAY column"))?;

        let variable_indices: Vec<(WeatherVariable, usize)> = WeatherVariable::ALL
            .into_iter()
            .filter_map(|var| {
                let index = header_record
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(var.name()));
                debug!(
                    "  '{}': {}",
                    var,
                    if index.is_some() { "Found" } else { "Not Found" }
                );
                index.map(|i| (var, i))
            })
            .collect();

        let mut records = Vec::new();
        for (row_index, result) in reader.records().enumerate() {
            let record = result?;
            let day_text = record.get(day_index).unwrap_or("");
            let day = parse_date(day_text).map_err(|e| {
                ChartError::invalid(format!("weather row {}: {e}", row_index + 1))
            })?;

            let mut row = WeatherRecord::on(day);
            for &(var, csv_index) in &variable_indices {
                let cell = record.get(csv_index).unwrap_or("");
                if cell.is_empty() {
                    continue;
                }
                let value = cell.parse::<f64>().map_err(|_| {
                    ChartError::invalid(format!(
                        "weather row {}: {var} value '{cell}' is not a number",
                        row_index + 1
                    ))
                })?;
                *row.value_mut(var) = Some(value);
            }
            records.push(row);
        }
        debug!("Finished reading {} weather rows.", records.len());
        let columns = variable_indices.iter().map(|&(var, _)| var).collect();
        Ok(Self::with_columns(records, columns))
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.day).collect()
    }

    pub fn has_column(&self, var: WeatherVariable) -> bool {
        self.columns.contains(&var)
    }

    fn require_column(&self, var: WeatherVariable) -> ChartResult<()> {
        if self.has_column(var) {
            Ok(())
        } else {
            Err(ChartError::invalid(format!("weather table has no {var} column")))
        }
    }

    /// Values of one variable; fails with `InvalidInput` when the table has no such column.
    pub fn column(&self, var: WeatherVariable) -> ChartResult<Column> {
        self.require_column(var)?;
        Ok(self.records.iter().map(|r| r.value(var)).collect())
    }

    pub fn dated_column(&self, var: WeatherVariable) -> ChartResult<DatedColumn> {
        self.require_column(var)?;
        Ok(self.records.iter().map(|r| (r.day, r.value(var))).collect())
    }

    /// Copy of the rows between `start` and `end`, inclusive. Columns are kept.
    pub fn filter_date_range(&self, start: &str, end: &str) -> ChartResult<WeatherTable> {
        let records = filter_date_range(&self.records, start, end)?;
        Ok(WeatherTable::with_columns(records, self.columns.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn variable_names_parse_case_insensitively() {
        assert_eq!("TMAX".parse::<WeatherVariable>().unwrap(), WeatherVariable::Tmax);
        assert_eq!("snowdepth".parse::<WeatherVariable>().unwrap(), WeatherVariable::SnowDepth);
        assert!(matches!(
            "ET0".parse::<WeatherVariable>(),
            Err(ChartError::InvalidInput(_))
        ));
    }

    #[test]
    fn default_units_cover_every_variable() {
        let units = WeatherUnits::default();
        for var in WeatherVariable::ALL {
            assert!(units.unit(var).is_ok());
        }
        assert_eq!(units.unit(WeatherVariable::Irrad).unwrap(), "kJ/m²");
        assert_eq!(units.unit_for_name("RAIN").unwrap(), "mm");
        assert!(units.unit_for_name("PRESSURE").is_err());
    }

    #[test]
    fn units_can_be_overridden_or_left_out() {
        let units = WeatherUnits::empty().with_unit(WeatherVariable::Irrad, "J/m²");
        assert_eq!(units.unit(WeatherVariable::Irrad).unwrap(), "J/m²");
        assert!(matches!(
            units.unit(WeatherVariable::Tmax),
            Err(ChartError::InvalidInput(_))
        ));
    }

    #[test]
    fn reads_csv_with_compact_days_and_missing_cells() {
        let csv_text = "DAY,TMAX,TMIN,RAIN\n20200101,20.0,10.0,\n20200102, 22.5 ,8.0,1.2\n";
        let table = WeatherTable::from_csv_reader(csv_text.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.days(), vec![ymd(2020, 1, 1), ymd(2020, 1, 2)]);
        assert_eq!(table.column(WeatherVariable::Tmax).unwrap(), vec![Some(20.0), Some(22.5)]);
        assert_eq!(table.column(WeatherVariable::Rain).unwrap(), vec![None, Some(1.2)]);
        assert!(!table.has_column(WeatherVariable::Wind));
    }

    #[test]
    fn csv_without_day_or_with_bad_day_fails() {
        assert!(WeatherTable::from_csv_reader("TMAX\n1.0\n".as_bytes()).is_err());
        assert!(matches!(
            WeatherTable::from_csv_reader("DAY,TMAX\n2020013x,1.0\n".as_bytes()),
            Err(ChartError::InvalidInput(_))
        ));
    }

    #[test]
    fn column_absent_from_csv_is_invalid_input() {
        let table = WeatherTable::from_csv_reader("DAY,TMIN\n20200101,5\n20200102,6\n".as_bytes())
            .unwrap();
        assert!(table.has_column(WeatherVariable::Tmin));
        let err = table.column(WeatherVariable::Tmax).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: weather table has no TMAX column");
        assert!(table.dated_column(WeatherVariable::Tmax).is_err());
        // filtering keeps the column set
        let window = table.filter_date_range("20200101", "20200101").unwrap();
        assert!(window.column(WeatherVariable::Tmax).is_err());
        assert_eq!(window.column(WeatherVariable::Tmin).unwrap(), vec![Some(5.0)]);
    }

    #[test]
    fn non_numeric_cell_fails() {
        let csv_text = "DAY,RAIN\n20200101,1.0\n20200102,abc\n20200103,2.0\n";
        let err = WeatherTable::from_csv_reader(csv_text.as_bytes()).unwrap_err();
        match err {
            ChartError::InvalidInput(msg) => {
                assert!(msg.contains("row 2"), "{msg}");
                assert!(msg.contains("'abc'"), "{msg}");
            }
            other => panic!("expected InvalidInput, got {other}"),
        }
    }

    #[test]
    fn date_filter_returns_a_copy() {
        let table = WeatherTable::new(vec![
            WeatherRecord::on(ymd(2020, 1, 1)),
            WeatherRecord::on(ymd(2020, 1, 2)),
            WeatherRecord::on(ymd(2020, 1, 3)),
        ]);
        let filtered = table.filter_date_range("2020-01-01", "2020-01-02").unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(table.len(), 3);
        assert!(table.filter_date_range("2019-01-01", "2019-02-01").unwrap().is_empty());
        assert!(table.filter_date_range("2020-01-01", "tomorrow").is_err());
    }
}
