//! Error taxonomy shared by the loader, filter and session.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The dataset could not be retrieved (network failure, bad status,
    /// unreadable file or corrupt compression).
    #[error("dataset unavailable at '{source_location}': {reason}")]
    DataUnavailable {
        source_location: String,
        reason: String,
    },

    #[error("dataset is missing required column '{column}'")]
    Schema { column: String },

    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("date range {start}..={end} is outside the dataset span {min}..={max}")]
    RangeOutOfBounds {
        start: NaiveDate,
        end: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("dataset contains no rows")]
    EmptyDataset,

    /// Raised for display only; the pipeline itself yields empty tables.
    #[error("no rentals recorded between {start} and {end}")]
    EmptySelection { start: NaiveDate, end: NaiveDate },

    #[error("invalid interaction: {0}")]
    InvalidInteraction(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    pub(crate) fn unavailable(source_location: &str, reason: impl ToString) -> Self {
        DashboardError::DataUnavailable {
            source_location: source_location.to_string(),
            reason: reason.to_string(),
        }
    }
}
