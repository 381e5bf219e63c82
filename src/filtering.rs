use crate::types::pollutant::DATE_COLUMN;
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, LazyFrame};

pub trait MeasurementFrameFilterExt {
    /// Filters a measurement LazyFrame by a NaiveDate range (inclusive on both ends).
    /// Assumes the 'date' column holds calendar dates.
    ///
    /// Row order is preserved. Rows whose date is null never match.
    ///
    /// # Arguments
    /// * `start_date`: The start NaiveDate (inclusive).
    /// * `end_date`: The end NaiveDate (inclusive).
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Errors surface on `collect`.
    fn filter_dates(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame;
}

impl MeasurementFrameFilterExt for LazyFrame {
    fn filter_dates(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame {
        self.filter(
            col(DATE_COLUMN)
                .cast(DataType::Date)
                .gt_eq(lit(start_date))
                .and(col(DATE_COLUMN).cast(DataType::Date).lt_eq(lit(end_date))),
        )
    }
}
