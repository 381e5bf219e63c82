use crate::aggregation::round_mean;
use crate::dataset::extractor::{get_opt_dates, get_opt_floats};
use crate::error::AirQualityError;
use crate::types::measurement::PollutantLevels;
use crate::types::pollutant::{Pollutant, DATE_COLUMN};
use chrono::NaiveDate;
use log::{debug, warn};
use polars::prelude::{col, Expr, LazyFrame, SortMultipleOptions};
use serde::Serialize;

/// Mean concentration of every pollutant on one calendar day.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DailyPollutants {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub levels: PollutantLevels<i64>,
}

/// Groups `frame` by date and averages each pollutant channel, one row per date in
/// ascending order.
///
/// Channels are averaged independently: a missing PM10 value does not remove that
/// record from the PM2.5 mean.
pub fn aggregate_daily_pollutants(
    frame: &LazyFrame,
) -> Result<Vec<DailyPollutants>, AirQualityError> {
    let means: Vec<Expr> = Pollutant::ALL
        .iter()
        .map(|p| col(p.column()).mean().alias(p.column()))
        .collect();
    let df = frame
        .clone()
        .group_by([col(DATE_COLUMN)])
        .agg(means)
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()?;

    let dates = get_opt_dates(&df, DATE_COLUMN)?;
    let mut rows: Vec<Option<DailyPollutants>> = dates
        .into_iter()
        .map(|date| {
            date.map(|date| DailyPollutants {
                date,
                levels: PollutantLevels::default(),
            })
        })
        .collect();

    for pollutant in Pollutant::ALL {
        let values = get_opt_floats(&df, pollutant.column())?;
        for (row, value) in rows.iter_mut().zip(values) {
            if let Some(row) = row {
                row.levels.set(pollutant, round_mean(value));
            }
        }
    }

    let total = rows.len();
    let rows: Vec<DailyPollutants> = rows.into_iter().flatten().collect();
    if rows.len() < total {
        warn!("Skipping {} daily pollutant group(s) without a date", total - rows.len());
    }
    debug!("Aggregated {} daily pollutant rows", rows.len());
    Ok(rows)
}
