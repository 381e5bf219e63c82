//! Converts the dashboard tables into Polars `DataFrame`s, which print as aligned
//! terminal tables.

use crate::aggregation::daily_aqi::DailyAqi;
use crate::aggregation::daily_pollutants::DailyPollutants;
use crate::aggregation::station_ranking::StationRanking;
use crate::aggregation::summary::Summary;
use crate::error::AirQualityError;
use crate::types::aqi_category::label_for;
use crate::types::pollutant::{Pollutant, AQI_COLUMN, DATE_COLUMN, STATION_COLUMN};
use chrono::NaiveDate;
use polars::prelude::*;

const CATEGORY_COLUMN: &str = "AQI_category";

pub fn daily_aqi_table(rows: &[DailyAqi]) -> Result<DataFrame, AirQualityError> {
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let values: Vec<Option<i64>> = rows.iter().map(|r| r.avg_aqi).collect();
    let categories: Vec<&str> = rows.iter().map(|r| label_for(r.category)).collect();
    Ok(df!(
        DATE_COLUMN => dates,
        AQI_COLUMN => values,
        CATEGORY_COLUMN => categories
    )?)
}

pub fn daily_pollutants_table(rows: &[DailyPollutants]) -> Result<DataFrame, AirQualityError> {
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let mut columns = vec![Column::new(DATE_COLUMN.into(), dates)];
    for pollutant in Pollutant::ALL {
        let values: Vec<Option<i64>> = rows.iter().map(|r| r.levels.get(pollutant)).collect();
        columns.push(Column::new(pollutant.column().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

pub fn station_ranking_table(rows: &[StationRanking]) -> Result<DataFrame, AirQualityError> {
    let stations: Vec<&str> = rows.iter().map(|r| r.station.as_str()).collect();
    let values: Vec<Option<i64>> = rows.iter().map(|r| r.avg_aqi).collect();
    let categories: Vec<&str> = rows.iter().map(|r| label_for(r.category)).collect();
    let colors: Vec<&str> = rows.iter().map(|r| r.color).collect();
    Ok(df!(
        STATION_COLUMN => stations,
        AQI_COLUMN => values,
        CATEGORY_COLUMN => categories,
        "Color" => colors
    )?)
}

/// One-row table of the summary values.
pub fn summary_table(summary: &Summary) -> Result<DataFrame, AirQualityError> {
    let mut columns = vec![
        Column::new(AQI_COLUMN.into(), [summary.avg_aqi]),
        Column::new(CATEGORY_COLUMN.into(), [label_for(summary.category)]),
    ];
    for pollutant in Pollutant::ALL {
        columns.push(Column::new(
            pollutant.column().into(),
            [summary.pollutants.get(pollutant)],
        ));
    }
    Ok(DataFrame::new(columns)?)
}
