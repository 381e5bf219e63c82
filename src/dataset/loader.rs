use crate::dataset::error::DatasetError;
use crate::types::pollutant::{
    get_schema_column_names, Pollutant, AQI_COLUMN, DATE_COLUMN, STATION_COLUMN,
};
use log::{debug, info, warn};
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::task;

/// Cell contents treated as missing in addition to empty cells.
const MISSING_MARKERS: [&str; 7] = ["NaN", "nan", "NA", "N/A", "null", "NULL", "None"];

/// Calendar date format of the `date` column. A trailing time component is tolerated.
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct DatasetLoader;

impl DatasetLoader {
    /// Reads a measurement CSV from disk and returns the typed, materialized dataset.
    pub fn read_path(path: &Path) -> Result<LazyFrame, DatasetError> {
        let df = Self::csv_options()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| DatasetError::CsvReadPath(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| DatasetError::CsvReadPath(path.to_path_buf(), e))?;
        info!("Read {} measurement rows from {:?}", df.height(), path);
        Self::prepare(df)
    }

    /// Reads an in-memory measurement CSV (header included).
    pub fn read_bytes(bytes: Vec<u8>) -> Result<LazyFrame, DatasetError> {
        let df = Self::csv_options()
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(DatasetError::CsvReadBytes)?;
        debug!("Parsed {} measurement rows from memory", df.height());
        Self::prepare(df)
    }

    /// Same as [`DatasetLoader::read_path`], run on the blocking thread pool.
    pub async fn read_path_async(path: PathBuf) -> Result<LazyFrame, DatasetError> {
        task::spawn_blocking(move || Self::read_path(&path)).await?
    }

    /// Checks the required columns and converts the raw text columns to their typed form.
    ///
    /// `date` becomes a `Date` column, `station` stays text, `avg_AQI` and the pollutant
    /// channels become `Float64`. Conversions are non-strict: values that fail to parse
    /// become null and are later ignored by the means. Extra columns are dropped.
    ///
    /// The typed frame is collected once so every later view scans the parsed data
    /// rather than re-parsing text.
    pub fn prepare(df: DataFrame) -> Result<LazyFrame, DatasetError> {
        for column in get_schema_column_names() {
            if df.column(column).is_err() {
                warn!("Measurement dataset has no '{}' column", column);
                return Err(DatasetError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut exprs = vec![
            col(DATE_COLUMN)
                .cast(DataType::String)
                .str()
                .to_date(StrptimeOptions {
                    format: Some(DATE_FORMAT.into()),
                    strict: false,
                    exact: false,
                    ..Default::default()
                })
                .alias(DATE_COLUMN),
            col(STATION_COLUMN)
                .cast(DataType::String)
                .alias(STATION_COLUMN),
            col(AQI_COLUMN).cast(DataType::Float64).alias(AQI_COLUMN),
        ];
        exprs.extend(
            Pollutant::ALL
                .iter()
                .map(|p| col(p.column()).cast(DataType::Float64).alias(p.column())),
        );

        let typed = df.lazy().select(exprs).collect()?;
        let undated = typed.column(DATE_COLUMN)?.null_count();
        if undated > 0 {
            warn!(
                "{} measurement rows have an unparseable date and will never match a date range",
                undated
            );
        }
        Ok(typed.lazy())
    }

    fn csv_options() -> CsvReadOptions {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .map_parse_options(|options| {
                options.with_null_values(Some(NullValues::AllColumns(
                    MISSING_MARKERS.iter().map(|m| (*m).into()).collect(),
                )))
            })
    }
}

/// CSV text with the canonical header followed by `rows`.
#[cfg(test)]
pub(crate) fn fixture_csv(rows: &[&str]) -> Vec<u8> {
    let mut text = get_schema_column_names().join(",");
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text.into_bytes()
}

/// Typed measurement frame built from CSV `rows` under the canonical header.
#[cfg(test)]
pub(crate) fn fixture(rows: &[&str]) -> Result<LazyFrame, DatasetError> {
    DatasetLoader::read_bytes(fixture_csv(rows))
}
