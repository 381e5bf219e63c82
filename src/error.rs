use crate::dataset::error::DatasetError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed to resolve a calendar date from the provided input")]
    DateParsingError,

    #[error("Failed processing DataFrame: {0}")]
    PolarsError(#[from] PolarsError),

    #[error("Dashboard section '{section}' is unavailable: {message}")]
    SectionUnavailable {
        section: &'static str,
        message: String,
    },
}
