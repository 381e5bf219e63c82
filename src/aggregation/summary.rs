use crate::aggregation::daily_aqi::DailyAqi;
use crate::aggregation::daily_pollutants::DailyPollutants;
use crate::aggregation::{classify_rounded, round_mean};
use crate::types::aqi_category::AqiCategory;
use crate::types::measurement::PollutantLevels;
use crate::types::pollutant::Pollutant;
use serde::Serialize;

/// Headline values for a view: overall AQI and the overall mean of each pollutant.
#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub struct Summary {
    #[serde(rename = "avg_AQI")]
    pub avg_aqi: Option<i64>,
    #[serde(rename = "AQI_category")]
    pub category: Option<AqiCategory>,
    #[serde(flatten)]
    pub pollutants: PollutantLevels<i64>,
}

impl Summary {
    /// Computes the summary from the daily tables.
    ///
    /// Each value is the rounded mean of the daily values, days without data skipped.
    /// With no days at all every value is `None`.
    pub fn from_tables(daily_aqi: &[DailyAqi], daily_pollutants: &[DailyPollutants]) -> Self {
        let avg_aqi = mean_of(daily_aqi.iter().map(|d| d.avg_aqi));
        let mut pollutants = PollutantLevels::default();
        for pollutant in Pollutant::ALL {
            pollutants.set(
                pollutant,
                mean_of(daily_pollutants.iter().map(|d| d.levels.get(pollutant))),
            );
        }
        Summary {
            avg_aqi,
            category: classify_rounded(avg_aqi),
            pollutants,
        }
    }
}

fn mean_of(values: impl Iterator<Item = Option<i64>>) -> Option<i64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v as f64, count + 1));
    if count == 0 {
        return None;
    }
    round_mean(Some(sum / count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn aqi_day(d: u32, value: Option<i64>) -> DailyAqi {
        DailyAqi {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            avg_aqi: value,
            category: classify_rounded(value),
        }
    }

    fn pollutant_day(d: u32, pm2_5: Option<i64>, co: Option<i64>) -> DailyPollutants {
        let mut levels = PollutantLevels::default();
        levels.set(Pollutant::Pm2_5, pm2_5);
        levels.set(Pollutant::Co, co);
        DailyPollutants {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            levels,
        }
    }

    #[test]
    fn test_mean_of_daily_values() {
        let summary = Summary::from_tables(
            &[aqi_day(1, Some(40)), aqi_day(2, Some(80)), aqi_day(3, None)],
            &[
                pollutant_day(1, Some(10), None),
                pollutant_day(2, Some(21), None),
            ],
        );
        assert_eq!(summary.avg_aqi, Some(60));
        assert_eq!(summary.category, Some(AqiCategory::Moderate));
        assert_eq!(summary.pollutants.get(Pollutant::Pm2_5), Some(16));
        assert_eq!(summary.pollutants.get(Pollutant::Co), None);
    }

    #[test]
    fn test_no_days_is_no_data() {
        let summary = Summary::from_tables(&[], &[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.avg_aqi, None);
        assert_eq!(summary.category, None);
    }

    #[test]
    fn test_single_day_is_its_own_value() {
        let summary = Summary::from_tables(&[aqi_day(1, Some(173))], &[]);
        assert_eq!(summary.avg_aqi, Some(173));
        assert_eq!(summary.category, Some(AqiCategory::Unhealthy));
    }
}
