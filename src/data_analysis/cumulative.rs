// src/data_analysis/cumulative.rs

use crate::error::{ChartError, ChartResult};
use crate::types::Column;

/// How missing cells are treated by [`cumulative_sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Missing stays missing at its own position; the running total continues past it.
    #[default]
    Skip,
    /// Missing at position i makes every position >= i missing.
    Propagate,
    /// Missing counts as zero.
    Zero,
}

/// Running sum of a column. `NaN` cells count as missing.
pub fn cumulative_sum(values: &[Option<f64>], policy: MissingPolicy) -> Column {
    let mut total = 0.0;
    let mut poisoned = false;
    values
        .iter()
        .map(|cell| {
            let cell = cell.filter(|v| !v.is_nan());
            match (cell, policy) {
                (Some(v), MissingPolicy::Propagate) => {
                    total += v;
                    if poisoned {
                        None
                    } else {
                        Some(total)
                    }
                }
                (Some(v), _) => {
                    total += v;
                    Some(total)
                }
                (None, MissingPolicy::Skip) => None,
                (None, MissingPolicy::Propagate) => {
                    poisoned = true;
                    None
                }
                (None, MissingPolicy::Zero) => Some(total),
            }
        })
        .collect()
}

/// Element-wise sum of two equally long columns; missing if either cell is missing.
pub fn sum_columns(a: &[Option<f64>], b: &[Option<f64>]) -> ChartResult<Column> {
    if a.len() != b.len() {
        return Err(ChartError::invalid(format!(
            "cannot add columns of different lengths ({} and {})",
            a.len(),
            b.len()
        )));
    }
    Ok(a
        .iter()
        .zip(b)
        .map(|(x, y)| x.and_then(|x| y.map(|y| x + y)))
        .collect())
}

/// Daily growing degree days, clipped at zero before any accumulation.
pub fn daily_gdd(tmax: f64, tmin: f64, tbase: f64) -> f64 {
    let gdd = (tmax + tmin) / 2.0 - tbase;
    if gdd > 0.0 {
        gdd
    } else {
        0.0
    }
}

/// Daily GDD for a pair of temperature columns. A missing temperature gives a missing day.
pub fn daily_gdd_series(
    tmax: &[Option<f64>],
    tmin: &[Option<f64>],
    tbase: f64,
) -> ChartResult<Column> {
    if tmax.len() != tmin.len() {
        return Err(ChartError::invalid(format!(
            "TMAX and TMIN columns differ in length ({} and {})",
            tmax.len(),
            tmin.len()
        )));
    }
    Ok(tmax
        .iter()
        .zip(tmin)
        .map(|(hi, lo)| match (hi, lo) {
            (Some(hi), Some(lo)) if !hi.is_nan() && !lo.is_nan() => Some(daily_gdd(*hi, *lo, tbase)),
            _ => None,
        })
        .collect())
}

/// Accumulated growing degree days over the given days.
pub fn cumulative_gdd(
    tmax: &[Option<f64>],
    tmin: &[Option<f64>],
    tbase: f64,
    policy: MissingPolicy,
) -> ChartResult<Column> {
    let daily = daily_gdd_series(tmax, tmin, tbase)?;
    Ok(cumulative_sum(&daily, policy))
}
