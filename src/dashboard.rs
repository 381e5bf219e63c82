//! The `AirQualityDashboard`: the loaded dataset plus the per-range view pipeline.

use crate::aggregation::daily_aqi::DailyAqi;
use crate::aggregation::daily_pollutants::DailyPollutants;
use crate::aggregation::station_ranking::StationRanking;
use crate::aggregation::summary::Summary;
use crate::dataset::loader::DatasetLoader;
use crate::error::AirQualityError;
use crate::types::measurement::Measurement;
use crate::types::measurement_frame::MeasurementLazyFrame;
use crate::types::traits::types::DateRange;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::{lit, LazyFrame};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The immutable measurement dataset and the operations that build dashboard views.
///
/// A dashboard is loaded once; every call to [`AirQualityDashboard::view`] filters and
/// aggregates from scratch, so one instance can serve any number of views and may be
/// shared across threads.
///
/// # Example
///
/// ```no_run
/// use air_quality_dashboard::AirQualityDashboard;
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dashboard = AirQualityDashboard::from_csv("all_data.csv")?;
///
/// // Whole dataset
/// let everything = dashboard.view().call()?;
///
/// // One month
/// let march = dashboard
///     .view()
///     .start(NaiveDate::from_ymd_opt(2016, 3, 1).unwrap())
///     .end(NaiveDate::from_ymd_opt(2016, 3, 31).unwrap())
///     .call()?;
/// println!("{:?}", march.summary);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AirQualityDashboard {
    measurements: MeasurementLazyFrame,
    bounds: Option<DateRange>,
}

#[bon]
impl AirQualityDashboard {
    /// Loads the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Dataset`] if the file cannot be read or lacks a required
    /// column.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, AirQualityError> {
        let frame = DatasetLoader::read_path(path.as_ref())?;
        Self::from_frame(frame)
    }

    /// Loads the dataset from a CSV file on Tokio's blocking thread pool.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AirQualityError> {
        let frame = DatasetLoader::read_path_async(path.into()).await?;
        Self::from_frame(frame)
    }

    /// Loads the dataset from in-memory CSV text (header included).
    pub fn from_csv_bytes(bytes: Vec<u8>) -> Result<Self, AirQualityError> {
        Self::from_frame(DatasetLoader::read_bytes(bytes)?)
    }

    /// Wraps an already typed measurement frame.
    pub fn from_measurements(measurements: MeasurementLazyFrame) -> Result<Self, AirQualityError> {
        let bounds = measurements.date_bounds()?;
        match bounds {
            Some(range) => info!("Dashboard dataset spans {}", range),
            None => warn!("Dashboard dataset contains no dated records"),
        }
        Ok(Self {
            measurements,
            bounds,
        })
    }

    fn from_frame(frame: LazyFrame) -> Result<Self, AirQualityError> {
        Self::from_measurements(MeasurementLazyFrame::new(frame))
    }

    /// Earliest and latest date in the dataset, the allowed range for date pickers.
    pub fn date_bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// The full typed dataset.
    pub fn measurements(&self) -> &MeasurementLazyFrame {
        &self.measurements
    }

    /// Materializes every record of the dataset.
    pub fn records(&self) -> Result<Vec<Measurement>, AirQualityError> {
        self.measurements.collect_measurements()
    }

    /// Builds the dashboard for one date range.
    ///
    /// # Arguments
    ///
    /// * `start` - First day (inclusive). Defaults to the dataset's first date.
    /// * `end` - Last day (inclusive). Defaults to the dataset's last date.
    ///
    /// When the dataset is empty and a bound is omitted, the other bound is used for it;
    /// with neither bound and no data the view is empty.
    ///
    /// Each table section is computed independently and carries its own `Result`, so a
    /// failure in one aggregation leaves the others intact.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::InvalidDateRange`] if the resolved start is after the
    /// resolved end.
    #[builder]
    pub fn view(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DashboardView, AirQualityError> {
        let start = start.or(self.bounds.map(|b| b.start)).or(end);
        let end = end.or(self.bounds.map(|b| b.end)).or(start);

        let (range, filtered) = match (start, end) {
            (Some(start), Some(end)) => {
                let range = DateRange::new(start, end)?;
                (Some(range), self.measurements.filter_range(range))
            }
            _ => (None, self.measurements.filter(lit(false))),
        };
        match range {
            Some(range) => info!("Building dashboard view for {}", range),
            None => info!("Building dashboard view over an empty dataset"),
        }

        let daily_aqi = log_failure("daily AQI", filtered.daily_aqi());
        let daily_pollutants = log_failure("daily pollutants", filtered.daily_pollutants());
        let station_ranking = log_failure("station ranking", filtered.station_ranking());
        let summary = Summary::from_tables(
            daily_aqi.as_deref().unwrap_or_default(),
            daily_pollutants.as_deref().unwrap_or_default(),
        );

        Ok(DashboardView {
            range,
            daily_aqi,
            daily_pollutants,
            station_ranking,
            summary,
        })
    }
}

fn log_failure<T>(
    section: &str,
    result: Result<Vec<T>, AirQualityError>,
) -> Result<Vec<T>, AirQualityError> {
    if let Err(e) = &result {
        warn!("Dashboard section '{}' failed: {}", section, e);
    }
    result
}

/// The outcome of one dashboard view: the three tables and the summary values.
#[derive(Debug)]
pub struct DashboardView {
    /// The inclusive range the view covers, `None` for a view over an empty dataset.
    pub range: Option<DateRange>,
    pub daily_aqi: Result<Vec<DailyAqi>, AirQualityError>,
    pub daily_pollutants: Result<Vec<DailyPollutants>, AirQualityError>,
    pub station_ranking: Result<Vec<StationRanking>, AirQualityError>,
    /// Overall values computed from whichever daily tables succeeded.
    pub summary: Summary,
}

impl DashboardView {
    /// Borrows the view as a serializable report.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::SectionUnavailable`] naming the first failed section.
    pub fn report(&self) -> Result<DashboardReport<'_>, AirQualityError> {
        Ok(DashboardReport {
            range: self.range,
            daily_aqi: section("daily_aqi", &self.daily_aqi)?,
            daily_pollutants: section("daily_pollutants", &self.daily_pollutants)?,
            station_ranking: section("station_ranking", &self.station_ranking)?,
            summary: &self.summary,
        })
    }
}

fn section<'a, T>(
    name: &'static str,
    result: &'a Result<Vec<T>, AirQualityError>,
) -> Result<&'a [T], AirQualityError> {
    result
        .as_deref()
        .map_err(|e| AirQualityError::SectionUnavailable {
            section: name,
            message: e.to_string(),
        })
}

/// Serializable form of a [`DashboardView`] whose sections all succeeded.
#[derive(Debug, Serialize)]
pub struct DashboardReport<'a> {
    pub range: Option<DateRange>,
    pub daily_aqi: &'a [DailyAqi],
    pub daily_pollutants: &'a [DailyPollutants],
    pub station_ranking: &'a [StationRanking],
    pub summary: &'a Summary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::fixture_csv;
    use crate::types::aqi_category::AqiCategory;
    use crate::types::pollutant::Pollutant;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dashboard() -> Result<AirQualityDashboard, AirQualityError> {
        AirQualityDashboard::from_csv_bytes(fixture_csv(&[
            "2024-01-01,A,40,10,20,3,30,400,60",
            "2024-01-01,A,60,12,22,3,30,400,60",
            "2024-01-01,A,80,14,24,3,30,400,60",
            "2024-01-02,B,120,50,90,6,45,900,20",
            "2024-01-03,A,30,8,15,2,25,300,70",
            "2024-01-03,B,NaN,,,,,,",
        ]))
    }

    #[test]
    fn test_full_view() -> Result<(), Box<dyn std::error::Error>> {
        let dashboard = dashboard()?;
        assert_eq!(
            dashboard.date_bounds(),
            Some(DateRange {
                start: ymd(2024, 1, 1),
                end: ymd(2024, 1, 3),
            })
        );

        let view = dashboard.view().call()?;
        let daily_aqi = view.daily_aqi.as_ref().map_err(|e| e.to_string())?;
        assert_eq!(daily_aqi.len(), 3);
        assert_eq!(daily_aqi[0].avg_aqi, Some(60));
        assert_eq!(daily_aqi[0].category, Some(AqiCategory::Moderate));
        assert_eq!(daily_aqi[1].avg_aqi, Some(120));
        assert_eq!(daily_aqi[2].avg_aqi, Some(30));

        let ranking = view.station_ranking.as_ref().map_err(|e| e.to_string())?;
        let names: Vec<&str> = ranking.iter().map(|r| r.station.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(ranking[0].avg_aqi, Some(52));
        assert_eq!(ranking[1].avg_aqi, Some(120));

        assert_eq!(view.summary.avg_aqi, Some(70));
        assert_eq!(view.summary.category, Some(AqiCategory::Moderate));
        assert_eq!(view.summary.pollutants.get(Pollutant::Pm2_5), Some(23));
        Ok(())
    }

    #[test]
    fn test_partial_range() -> Result<(), Box<dyn std::error::Error>> {
        let view = dashboard()?.view().start(ymd(2024, 1, 2)).call()?;
        assert_eq!(
            view.range,
            Some(DateRange {
                start: ymd(2024, 1, 2),
                end: ymd(2024, 1, 3),
            })
        );
        let pollutants = view.daily_pollutants.as_ref().map_err(|e| e.to_string())?;
        assert_eq!(pollutants.len(), 2);
        assert_eq!(pollutants[1].levels.get(Pollutant::Pm2_5), Some(8));
        Ok(())
    }

    #[test]
    fn test_view_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
        let dashboard = dashboard()?;
        let first = dashboard.view().call()?;
        let second = dashboard.view().call()?;
        let first = serde_json::to_string(&first.report()?)?;
        let second = serde_json::to_string(&second.report()?)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_range_after_data_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let view = dashboard()?
            .view()
            .start(ymd(2025, 1, 1))
            .end(ymd(2025, 12, 31))
            .call()?;
        let report = view.report()?;
        assert!(report.daily_aqi.is_empty());
        assert!(report.daily_pollutants.is_empty());
        assert!(report.station_ranking.is_empty());
        assert_eq!(report.summary.avg_aqi, None);
        assert_eq!(report.summary.category, None);
        Ok(())
    }

    #[test]
    fn test_reversed_range_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let result = dashboard()?
            .view()
            .start(ymd(2024, 1, 3))
            .end(ymd(2024, 1, 1))
            .call();
        assert!(matches!(
            result,
            Err(AirQualityError::InvalidDateRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_empty_dataset() -> Result<(), Box<dyn std::error::Error>> {
        let dashboard = AirQualityDashboard::from_csv_bytes(fixture_csv(&[]))?;
        assert_eq!(dashboard.date_bounds(), None);

        let view = dashboard.view().call()?;
        assert_eq!(view.range, None);
        assert!(view.report()?.daily_aqi.is_empty());

        let view = dashboard.view().end(ymd(2024, 1, 1)).call()?;
        assert_eq!(view.range, Some(DateRange::single(ymd(2024, 1, 1))));
        Ok(())
    }

    #[test]
    fn test_report_serialization() -> Result<(), Box<dyn std::error::Error>> {
        let view = dashboard()?.view().end(ymd(2024, 1, 1)).call()?;
        let json = serde_json::to_value(view.report()?)?;
        assert_eq!(json["range"]["start"], "2024-01-01");
        assert_eq!(json["daily_aqi"][0]["AQI_category"], "Moderate");
        assert_eq!(json["station_ranking"][0]["Color"], "yellow");
        assert_eq!(json["summary"]["avg_AQI"], 60);
        Ok(())
    }

    #[test]
    fn test_failed_section_is_reported() {
        let view = DashboardView {
            range: None,
            daily_aqi: Ok(vec![]),
            daily_pollutants: Err(AirQualityError::DateParsingError),
            station_ranking: Ok(vec![]),
            summary: Summary::default(),
        };
        match view.report() {
            Err(AirQualityError::SectionUnavailable { section, .. }) => {
                assert_eq!(section, "daily_pollutants")
            }
            other => panic!("expected SectionUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_open_async() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&fixture_csv(&["2024-01-01,A,40,1,2,3,4,5,6"]))?;
        file.flush()?;

        let dashboard = AirQualityDashboard::open(file.path()).await?;
        assert_eq!(dashboard.records()?.len(), 1);
        Ok(())
    }
}
