//! Group-by-day and group-by-station reductions over a filtered measurement frame.
//!
//! Means are computed by Polars (nulls ignored). Rounding and classification happen on
//! the collected values so every table, and the summary, round the same way.

pub mod daily_aqi;
pub mod daily_pollutants;
pub mod station_ranking;
pub mod summary;

use crate::types::aqi_category::AqiCategory;

/// Rounds a mean to the nearest integer, ties to even.
///
/// `None` (no values) and non-finite means both yield `None`, the "no data" result.
pub(crate) fn round_mean(mean: Option<f64>) -> Option<i64> {
    mean.filter(|m| m.is_finite())
        .map(|m| m.round_ties_even() as i64)
}

pub(crate) fn classify_rounded(value: Option<i64>) -> Option<AqiCategory> {
    AqiCategory::classify_opt(value.map(|v| v as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_mean_ties_to_even() {
        assert_eq!(round_mean(Some(60.0)), Some(60));
        assert_eq!(round_mean(Some(60.4)), Some(60));
        assert_eq!(round_mean(Some(60.6)), Some(61));
        assert_eq!(round_mean(Some(50.5)), Some(50));
        assert_eq!(round_mean(Some(51.5)), Some(52));
    }

    #[test]
    fn test_round_mean_no_data() {
        assert_eq!(round_mean(None), None);
        assert_eq!(round_mean(Some(f64::NAN)), None);
        assert_eq!(round_mean(Some(f64::INFINITY)), None);
    }

    #[test]
    fn test_classify_rounded() {
        assert_eq!(classify_rounded(Some(50)), Some(AqiCategory::Good));
        assert_eq!(classify_rounded(None), None);
    }
}
