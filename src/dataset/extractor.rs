//! Column accessors that turn collected Polars columns into plain Rust vectors.

use crate::dataset::error::DatasetError;
use crate::types::traits::utils::days_to_date;
use chrono::NaiveDate;
use polars::prelude::*;

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, DatasetError> {
    df.column(name)
        .map_err(|e| DatasetError::ColumnNotFound(name.to_string(), e))
}

fn type_error(name: &str) -> impl FnOnce(PolarsError) -> DatasetError + '_ {
    move |source| DatasetError::ColumnType {
        column: name.to_string(),
        source,
    }
}

/// Reads a `Date` column through its physical day count.
pub(crate) fn get_opt_dates(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>, DatasetError> {
    let days = get_column(df, name)?
        .cast(&DataType::Int32)
        .map_err(type_error(name))?;
    let days = days.i32().map_err(type_error(name))?;
    Ok(days.into_iter().map(|d| d.and_then(days_to_date)).collect())
}

pub(crate) fn get_opt_floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DatasetError> {
    let values = get_column(df, name)?
        .cast(&DataType::Float64)
        .map_err(type_error(name))?;
    let values = values.f64().map_err(type_error(name))?;
    Ok(values.into_iter().collect())
}

pub(crate) fn get_opt_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DatasetError> {
    let values = get_column(df, name)?.str().map_err(type_error(name))?;
    Ok(values.into_iter().map(|s| s.map(str::to_owned)).collect())
}
