use crate::aggregation::{classify_rounded, round_mean};
use crate::dataset::extractor::{get_opt_floats, get_opt_strings};
use crate::error::AirQualityError;
use crate::types::aqi_category::{color_for, AqiCategory};
use crate::types::pollutant::{AQI_COLUMN, STATION_COLUMN};
use log::{debug, warn};
use polars::prelude::{col, LazyFrame};
use serde::Serialize;

/// Mean AQI of one station over the filtered period.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct StationRanking {
    pub station: String,
    #[serde(rename = "avg_AQI")]
    pub avg_aqi: Option<i64>,
    #[serde(rename = "AQI_category")]
    pub category: Option<AqiCategory>,
    /// Display color of `category`, `lightgray` when undefined.
    #[serde(rename = "Color")]
    pub color: &'static str,
}

/// Averages `avg_AQI` per station and orders the stations by ascending mean.
///
/// The sort is stable: equal means keep the order in which the stations first appear in
/// `frame`. Stations without any AQI value are placed after all ranked stations.
pub fn aggregate_station_ranking(
    frame: &LazyFrame,
) -> Result<Vec<StationRanking>, AirQualityError> {
    let df = frame
        .clone()
        .group_by_stable([col(STATION_COLUMN)])
        .agg([col(AQI_COLUMN).mean().alias(AQI_COLUMN)])
        .collect()?;

    let stations = get_opt_strings(&df, STATION_COLUMN)?;
    let means = get_opt_floats(&df, AQI_COLUMN)?;

    let mut rows = Vec::with_capacity(df.height());
    for (station, mean) in stations.into_iter().zip(means) {
        let Some(station) = station else {
            warn!("Skipping station ranking group without a station name");
            continue;
        };
        let avg_aqi = round_mean(mean);
        let category = classify_rounded(avg_aqi);
        rows.push(StationRanking {
            station,
            avg_aqi,
            category,
            color: color_for(category),
        });
    }
    rows.sort_by_key(|r| (r.avg_aqi.is_none(), r.avg_aqi));
    debug!("Ranked {} stations", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::fixture;

    fn names(rows: &[StationRanking]) -> Vec<&str> {
        rows.iter().map(|r| r.station.as_str()).collect()
    }

    #[test]
    fn test_ranked_ascending() -> Result<(), Box<dyn std::error::Error>> {
        let frame = fixture(&[
            "2024-01-01,B,100,1,1,1,1,1,1",
            "2024-01-02,B,140,1,1,1,1,1,1",
            "2024-01-01,A,30,1,1,1,1,1,1",
        ])?;
        let rows = aggregate_station_ranking(&frame)?;
        assert_eq!(names(&rows), vec!["A", "B"]);
        assert_eq!(rows[0].avg_aqi, Some(30));
        assert_eq!(rows[0].color, "green");
        assert_eq!(rows[1].avg_aqi, Some(120));
        assert_eq!(rows[1].category, Some(AqiCategory::UnhealthyForSensitiveGroups));
        assert_eq!(rows[1].color, "orange");
        Ok(())
    }

    #[test]
    fn test_ties_keep_first_appearance_order() -> Result<(), Box<dyn std::error::Error>> {
        let frame = fixture(&[
            "2024-01-01,Zeta,70,1,1,1,1,1,1",
            "2024-01-01,Alpha,70,1,1,1,1,1,1",
            "2024-01-01,Mid,20,1,1,1,1,1,1",
        ])?;
        let rows = aggregate_station_ranking(&frame)?;
        assert_eq!(names(&rows), vec!["Mid", "Zeta", "Alpha"]);
        Ok(())
    }

    #[test]
    fn test_interleaved_ties_keep_first_appearance_order() -> Result<(), Box<dyn std::error::Error>> {
        let frame = fixture(&[
            "2024-01-01,C,60,1,1,1,1,1,1",
            "2024-01-01,A,50,1,1,1,1,1,1",
            "2024-01-01,D,-5,1,1,1,1,1,1",
            "2024-01-02,A,70,1,1,1,1,1,1",
            "2024-01-02,B,60,1,1,1,1,1,1",
        ])?;
        let rows = aggregate_station_ranking(&frame)?;
        assert_eq!(names(&rows), vec!["D", "C", "A", "B"]);
        assert_eq!(rows[0].avg_aqi, Some(-5));
        assert_eq!(rows[0].category, Some(AqiCategory::Good));
        assert!(rows[1..].iter().all(|r| r.avg_aqi == Some(60)));
        Ok(())
    }

    #[test]
    fn test_station_without_aqi_is_last() -> Result<(), Box<dyn std::error::Error>> {
        let frame = fixture(&[
            "2024-01-01,Empty,,1,1,1,1,1,1",
            "2024-01-01,High,250,1,1,1,1,1,1",
            "2024-01-01,Low,10,1,1,1,1,1,1",
        ])?;
        let rows = aggregate_station_ranking(&frame)?;
        assert_eq!(names(&rows), vec!["Low", "High", "Empty"]);
        assert_eq!(rows[2].avg_aqi, None);
        assert_eq!(rows[2].category, None);
        assert_eq!(rows[2].color, "lightgray");
        Ok(())
    }

    #[test]
    fn test_ranking_is_non_decreasing() -> Result<(), Box<dyn std::error::Error>> {
        let frame = fixture(&[
            "2024-01-01,S1,310,1,1,1,1,1,1",
            "2024-01-01,S2,12,1,1,1,1,1,1",
            "2024-01-01,S3,180,1,1,1,1,1,1",
            "2024-01-01,S4,75,1,1,1,1,1,1",
            "2024-01-01,S5,220,1,1,1,1,1,1",
        ])?;
        let rows = aggregate_station_ranking(&frame)?;
        let values: Vec<i64> = rows.iter().filter_map(|r| r.avg_aqi).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(rows.len(), 5);
        Ok(())
    }

    #[test]
    fn test_serialized_field_names() -> Result<(), Box<dyn std::error::Error>> {
        let rows = aggregate_station_ranking(&fixture(&["2024-01-01,A,160,1,1,1,1,1,1"])?)?;
        let json = serde_json::to_value(&rows[0])?;
        assert_eq!(json["station"], "A");
        assert_eq!(json["avg_AQI"], 160);
        assert_eq!(json["AQI_category"], "Unhealthy");
        assert_eq!(json["Color"], "red");
        Ok(())
    }
}
