// src/error.rs

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors raised while deriving chart series or rendering them.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Malformed caller input: bad dates, odd pF/SM sequences, unknown columns.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// No curve point with exactly this pressure head.
    #[error("No moisture value at pF {pf} in the retention curve")]
    NotFound { pf: f64 },
    #[error("{what} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl ChartError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ChartError::InvalidInput(msg.into())
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

impl From<csv::Error> for ChartError {
    fn from(err: csv::Error) -> Self {
        ChartError::InvalidInput(format!("CSV read error: {err}"))
    }
}

/// Convenience type for `Result<T, ChartError>`.
pub type ChartResult<T> = Result<T, ChartError>;
