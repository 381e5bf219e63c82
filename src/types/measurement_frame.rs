//! Contains the `MeasurementLazyFrame` structure for lazy operations on air-quality
//! measurement data.

use crate::aggregation::daily_aqi::{aggregate_daily_aqi, DailyAqi};
use crate::aggregation::daily_pollutants::{aggregate_daily_pollutants, DailyPollutants};
use crate::aggregation::station_ranking::{aggregate_station_ranking, StationRanking};
use crate::dataset::extractor::{get_opt_dates, get_opt_floats, get_opt_strings};
use crate::error::AirQualityError;
use crate::filtering::MeasurementFrameFilterExt;
use crate::types::measurement::{Measurement, PollutantLevels};
use crate::types::pollutant::{Pollutant, AQI_COLUMN, DATE_COLUMN, STATION_COLUMN};
use crate::types::traits::any_date::AnyDate;
use crate::types::traits::types::DateRange;
use log::warn;
use polars::prelude::{col, lit, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding typed measurement records.
///
/// Every record has the columns `date` (Date), `station` (String), `avg_AQI` and the six
/// pollutant channels (Float64, nullable). Instances are obtained from
/// [`crate::DatasetLoader`] output or from [`crate::AirQualityDashboard::measurements`].
///
/// # Errors
///
/// Operations that collect the underlying frame can return
/// [`AirQualityError::PolarsError`]. Methods resolving dates (`get_range`, `get_at`,
/// `get_for_period`) return [`AirQualityError::DateParsingError`] when an input cannot
/// be resolved to a calendar date.
#[derive(Clone)]
pub struct MeasurementLazyFrame {
    /// The underlying Polars LazyFrame containing the measurement records.
    pub frame: LazyFrame,
}

impl MeasurementLazyFrame {
    /// Wraps a `LazyFrame` assumed to carry the typed measurement schema.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Filters the records with an arbitrary Polars predicate.
    ///
    /// Returns a *new* `MeasurementLazyFrame`; `self` is left untouched.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use air_quality_dashboard::{AirQualityDashboard, AQI_COLUMN};
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let dashboard = AirQualityDashboard::from_csv("all_data.csv")?;
    /// let smoggy = dashboard.measurements().filter(col(AQI_COLUMN).gt(lit(200.0)));
    /// println!("{}", smoggy.frame.collect()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> MeasurementLazyFrame {
        MeasurementLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps the records whose date lies within `[start, end]` (inclusive).
    ///
    /// `start` and `end` can be any [`AnyDate`]: a `NaiveDate`, a `"YYYY-MM-DD"` string,
    /// a [`crate::Month`] or a [`crate::Year`]. The start resolves to the first day of its
    /// span and the end to the last day.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::DateParsingError`] if either bound cannot be resolved,
    /// and [`AirQualityError::InvalidDateRange`] if the resolved start is after the end.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<MeasurementLazyFrame, AirQualityError> {
        let start_naive = start
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?
            .start;
        let end_naive = end
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?
            .end;
        let range = DateRange::new(start_naive, end_naive)?;
        Ok(self.filter_range(range))
    }

    /// Keeps the records within an already validated range.
    pub fn filter_range(&self, range: DateRange) -> MeasurementLazyFrame {
        MeasurementLazyFrame::new(self.frame.clone().filter_dates(range.start, range.end))
    }

    /// Keeps the records of a single day.
    ///
    /// If `date` resolves to a span (like a `Year`) its first day is used.
    pub fn get_at(&self, date: impl AnyDate) -> Result<MeasurementLazyFrame, AirQualityError> {
        let naive_date = date
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?
            .start;
        Ok(self.filter(col(DATE_COLUMN).eq(lit(naive_date))))
    }

    /// Keeps every record within the span of `period`, e.g. all of `Year(2016)`.
    pub fn get_for_period(
        &self,
        period: impl AnyDate,
    ) -> Result<MeasurementLazyFrame, AirQualityError> {
        let range = period
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?;
        self.get_range(range.start, range.end)
    }

    /// Returns the earliest and latest record date, or `None` when there are no dated
    /// records.
    pub fn date_bounds(&self) -> Result<Option<DateRange>, AirQualityError> {
        let df = self
            .frame
            .clone()
            .select([
                col(DATE_COLUMN).min().alias("min"),
                col(DATE_COLUMN).max().alias("max"),
            ])
            .collect()?;
        let min = get_opt_dates(&df, "min")?.into_iter().next().flatten();
        let max = get_opt_dates(&df, "max")?.into_iter().next().flatten();
        match (min, max) {
            (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
            _ => Ok(None),
        }
    }

    /// Materializes the records as [`Measurement`] values, in frame order.
    ///
    /// Records without a date or station are skipped.
    pub fn collect_measurements(&self) -> Result<Vec<Measurement>, AirQualityError> {
        let df = self.frame.clone().collect()?;
        let dates = get_opt_dates(&df, DATE_COLUMN)?;
        let stations = get_opt_strings(&df, STATION_COLUMN)?;
        let aqi = get_opt_floats(&df, AQI_COLUMN)?;
        let mut channels = Vec::with_capacity(Pollutant::ALL.len());
        for pollutant in Pollutant::ALL {
            channels.push((pollutant, get_opt_floats(&df, pollutant.column())?));
        }

        let mut measurements = Vec::with_capacity(df.height());
        let mut skipped = 0usize;
        for (i, ((date, station), aqi)) in dates.into_iter().zip(stations).zip(aqi).enumerate() {
            let (Some(date), Some(station)) = (date, station) else {
                skipped += 1;
                continue;
            };
            let mut pollutants = PollutantLevels::default();
            for (pollutant, values) in &channels {
                pollutants.set(*pollutant, values.get(i).copied().flatten());
            }
            measurements.push(Measurement {
                date,
                station,
                aqi,
                pollutants,
            });
        }
        if skipped > 0 {
            warn!("Skipped {} records without a date or station", skipped);
        }
        Ok(measurements)
    }

    /// Mean AQI per day, see [`crate::aggregate_daily_aqi`].
    pub fn daily_aqi(&self) -> Result<Vec<DailyAqi>, AirQualityError> {
        aggregate_daily_aqi(&self.frame)
    }

    /// Mean pollutant levels per day, see [`crate::aggregate_daily_pollutants`].
    pub fn daily_pollutants(&self) -> Result<Vec<DailyPollutants>, AirQualityError> {
        aggregate_daily_pollutants(&self.frame)
    }

    /// Stations ordered by mean AQI, see [`crate::aggregate_station_ranking`].
    pub fn station_ranking(&self) -> Result<Vec<StationRanking>, AirQualityError> {
        aggregate_station_ranking(&self.frame)
    }
}
