use crate::aggregation::{classify_rounded, round_mean};
use crate::dataset::extractor::{get_opt_dates, get_opt_floats};
use crate::error::AirQualityError;
use crate::types::aqi_category::AqiCategory;
use crate::types::pollutant::{AQI_COLUMN, DATE_COLUMN};
use chrono::NaiveDate;
use log::{debug, warn};
use polars::prelude::{col, LazyFrame, SortMultipleOptions};
use serde::Serialize;

/// Mean AQI of one calendar day.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DailyAqi {
    pub date: NaiveDate,
    /// Rounded mean AQI, `None` when no record of the day carries an AQI value.
    #[serde(rename = "avg_AQI")]
    pub avg_aqi: Option<i64>,
    #[serde(rename = "AQI_category")]
    pub category: Option<AqiCategory>,
}

/// Groups `frame` by date and averages `avg_AQI`, one row per date in ascending order.
///
/// Records with a missing AQI are left out of their day's mean. Records without a date
/// are dropped.
pub fn aggregate_daily_aqi(frame: &LazyFrame) -> Result<Vec<DailyAqi>, AirQualityError> {
    let df = frame
        .clone()
        .group_by([col(DATE_COLUMN)])
        .agg([col(AQI_COLUMN).mean().alias(AQI_COLUMN)])
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()?;

    let dates = get_opt_dates(&df, DATE_COLUMN)?;
    let means = get_opt_floats(&df, AQI_COLUMN)?;

    let mut rows = Vec::with_capacity(df.height());
    for (date, mean) in dates.into_iter().zip(means) {
        let Some(date) = date else {
            warn!("Skipping daily AQI group without a date");
            continue;
        };
        let avg_aqi = round_mean(mean);
        rows.push(DailyAqi {
            date,
            avg_aqi,
            category: classify_rounded(avg_aqi),
        });
    }
    debug!("Aggregated {} daily AQI rows", rows.len());
    Ok(rows)
}
