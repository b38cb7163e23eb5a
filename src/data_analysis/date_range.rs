// src/data_analysis/date_range.rs

use chrono::NaiveDate;
use log::debug;

use crate::error::{ChartError, ChartResult};

/// A table row that carries a calendar date.
pub trait DateIndexed {
    fn date(&self) -> NaiveDate;
}

impl DateIndexed for NaiveDate {
    fn date(&self) -> NaiveDate {
        *self
    }
}

/// Parses an 8-digit `year*10000 + month*100 + day` integer (the weather `DAY` column).
pub fn parse_compact_date(value: i64) -> ChartResult<NaiveDate> {
    if !(10_000_000..=99_999_999).contains(&value) {
        return Err(ChartError::invalid(format!(
            "'{value}' is not an 8-digit YYYYMMDD date"
        )));
    }
    let year = (value / 10_000) as i32;
    let month = ((value / 100) % 100) as u32;
    let day = (value % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ChartError::invalid(format!("'{value}' is not a valid calendar date")))
}

/// Parses a date given either as `YYYY-MM-DD` or as compact `YYYYMMDD`.
pub fn parse_date(text: &str) -> ChartResult<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ChartError::invalid(format!("cannot parse date '{text}'")))?;
        return parse_compact_date(value);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|e| ChartError::invalid(format!("cannot parse date '{text}': {e}")))
}

/// Copies the rows whose date lies in `[start, end]`, both ends inclusive.
///
/// An empty result is valid; so is `start > end`, which selects nothing.
pub fn filter_between<T: DateIndexed + Clone>(rows: &[T], start: NaiveDate, end: NaiveDate) -> Vec<T> {
    let selected: Vec<T> = rows
        .iter()
        .filter(|row| {
            let date = row.date();
            date >= start && date <= end
        })
        .cloned()
        .collect();
    debug!(
        "Date filter {start}..={end} kept {} of {} rows",
        selected.len(),
        rows.len()
    );
    selected
}

/// Date-range filter with textual bounds. Unparseable bounds fail with `InvalidInput`.
pub fn filter_date_range<T: DateIndexed + Clone>(
    rows: &[T],
    start: &str,
    end: &str,
) -> ChartResult<Vec<T>> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    Ok(filter_between(rows, start, end))
}

/// Plot x coordinate for a date: days since 0001-01-01 (CE).
pub fn date_to_x(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_to_x`], rounding to the nearest day. Used for axis labels.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}
