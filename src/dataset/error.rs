use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read measurement CSV '{0}'")]
    CsvReadPath(PathBuf, #[source] PolarsError),

    #[error("Failed to parse in-memory measurement CSV")]
    CsvReadBytes(#[source] PolarsError),

    #[error("Measurement dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' does not have the expected type")]
    ColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
