//! Defines the `AqiCategory` enum, the fixed six-level severity taxonomy used to classify
//! Air Quality Index values, together with the display colors shared by every chart.

use serde::Serialize;
use std::fmt;

/// Color used for values that could not be classified (missing or NaN AQI).
pub const UNDEFINED_COLOR: &str = "lightgray";

/// Upper edge of the shaded Hazardous band in the daily AQI chart.
pub const HAZARDOUS_DISPLAY_CEILING: f64 = 400.0;

/// Represents the severity category of an Air Quality Index value.
///
/// Each variant carries its inclusive upper AQI bound and its display color. Variants
/// are ordered from best to worst air quality, so `Good < Hazardous`.
///
/// Use [`AqiCategory::classify`] to map a numeric value to a category. Values that
/// cannot be classified (NaN) yield `None`, the "undefined" category; callers pick
/// [`UNDEFINED_COLOR`] for those via [`color_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AqiCategory {
    /// AQI 0-50.
    Good,
    /// AQI 51-100.
    Moderate,
    /// AQI 101-150.
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    /// AQI 151-200.
    Unhealthy,
    /// AQI 201-300.
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    /// AQI above 300.
    Hazardous,
}

impl AqiCategory {
    /// All categories from best to worst.
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthyForSensitiveGroups,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    /// Classifies an AQI value.
    ///
    /// Upper bounds are inclusive: exactly 50 is `Good`, exactly 100 is `Moderate`, and
    /// so on. Negative values fall into `Good`. Anything above 300, including positive
    /// infinity, is `Hazardous`.
    ///
    /// # Returns
    ///
    /// * `Some(AqiCategory)` for any value that compares numerically.
    /// * `None` for NaN, which is the "undefined" category.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use air_quality_dashboard::AqiCategory;
    ///
    /// assert_eq!(AqiCategory::classify(50.0), Some(AqiCategory::Good));
    /// assert_eq!(AqiCategory::classify(50.5), Some(AqiCategory::Moderate));
    /// assert_eq!(AqiCategory::classify(301.0), Some(AqiCategory::Hazardous));
    /// assert_eq!(AqiCategory::classify(f64::NAN), None);
    /// ```
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        Self::ALL.into_iter().find(|category| match category.upper_bound() {
            Some(bound) => value <= bound,
            None => value > 300.0,
        })
    }

    /// Classifies an optional AQI value, mapping `None` to the undefined category.
    pub fn classify_opt(value: Option<f64>) -> Option<Self> {
        value.and_then(Self::classify)
    }

    /// Inclusive upper AQI bound, or `None` for the unbounded `Hazardous` band.
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            AqiCategory::Good => Some(50.0),
            AqiCategory::Moderate => Some(100.0),
            AqiCategory::UnhealthyForSensitiveGroups => Some(150.0),
            AqiCategory::Unhealthy => Some(200.0),
            AqiCategory::VeryUnhealthy => Some(300.0),
            AqiCategory::Hazardous => None,
        }
    }

    /// Lower AQI edge of the band (exclusive, except `0.0` for `Good`).
    pub fn lower_bound(self) -> f64 {
        match self {
            AqiCategory::Good => 0.0,
            AqiCategory::Moderate => 50.0,
            AqiCategory::UnhealthyForSensitiveGroups => 100.0,
            AqiCategory::Unhealthy => 150.0,
            AqiCategory::VeryUnhealthy => 200.0,
            AqiCategory::Hazardous => 300.0,
        }
    }

    /// The `(y0, y1)` extent of the band when shaded on a chart.
    ///
    /// The unbounded `Hazardous` band is drawn up to [`HAZARDOUS_DISPLAY_CEILING`].
    pub fn display_band(self) -> (f64, f64) {
        (
            self.lower_bound(),
            self.upper_bound().unwrap_or(HAZARDOUS_DISPLAY_CEILING),
        )
    }

    /// Human readable category name.
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// CSS color name used for bars, bands and legend swatches.
    pub fn color(self) -> &'static str {
        match self {
            AqiCategory::Good => "green",
            AqiCategory::Moderate => "yellow",
            AqiCategory::UnhealthyForSensitiveGroups => "orange",
            AqiCategory::Unhealthy => "red",
            AqiCategory::VeryUnhealthy => "purple",
            AqiCategory::Hazardous => "maroon",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color for a possibly undefined category.
pub fn color_for(category: Option<AqiCategory>) -> &'static str {
    category.map(AqiCategory::color).unwrap_or(UNDEFINED_COLOR)
}

/// Display label for a possibly undefined category.
pub fn label_for(category: Option<AqiCategory>) -> &'static str {
    category.map(AqiCategory::label).unwrap_or("Undefined")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_fall_into_lower_band() {
        assert_eq!(AqiCategory::classify(50.0), Some(AqiCategory::Good));
        assert_eq!(AqiCategory::classify(100.0), Some(AqiCategory::Moderate));
        assert_eq!(
            AqiCategory::classify(150.0),
            Some(AqiCategory::UnhealthyForSensitiveGroups)
        );
        assert_eq!(AqiCategory::classify(200.0), Some(AqiCategory::Unhealthy));
        assert_eq!(AqiCategory::classify(300.0), Some(AqiCategory::VeryUnhealthy));
    }

    #[test]
    fn test_values_just_above_boundaries() {
        assert_eq!(AqiCategory::classify(51.0), Some(AqiCategory::Moderate));
        assert_eq!(
            AqiCategory::classify(100.5),
            Some(AqiCategory::UnhealthyForSensitiveGroups)
        );
        assert_eq!(AqiCategory::classify(151.0), Some(AqiCategory::Unhealthy));
        assert_eq!(AqiCategory::classify(201.0), Some(AqiCategory::VeryUnhealthy));
        assert_eq!(AqiCategory::classify(300.01), Some(AqiCategory::Hazardous));
        assert_eq!(AqiCategory::classify(999.0), Some(AqiCategory::Hazardous));
    }

    #[test]
    fn test_negative_and_infinite_values() {
        assert_eq!(AqiCategory::classify(-10.0), Some(AqiCategory::Good));
        assert_eq!(AqiCategory::classify(f64::NEG_INFINITY), Some(AqiCategory::Good));
        assert_eq!(AqiCategory::classify(f64::INFINITY), Some(AqiCategory::Hazardous));
    }

    #[test]
    fn test_undefined_inputs() {
        assert_eq!(AqiCategory::classify(f64::NAN), None);
        assert_eq!(AqiCategory::classify_opt(None), None);
        assert_eq!(color_for(None), UNDEFINED_COLOR);
        assert_eq!(label_for(None), "Undefined");
    }

    #[test]
    fn test_every_non_negative_value_is_classified() {
        for tenth in 0..5_000 {
            let value = tenth as f64 / 10.0;
            assert!(AqiCategory::classify(value).is_some(), "value {value}");
        }
    }

    #[test]
    fn test_classification_is_monotonic() {
        let mut previous = AqiCategory::Good;
        for value in 0..=450 {
            let current = AqiCategory::classify(value as f64).unwrap();
            assert!(current >= previous, "category dropped at {value}");
            previous = current;
        }
    }

    #[test]
    fn test_display_bands_are_contiguous() {
        let bands: Vec<(f64, f64)> = AqiCategory::ALL.iter().map(|c| c.display_band()).collect();
        assert_eq!(bands[0].0, 0.0);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(bands[5].1, HAZARDOUS_DISPLAY_CEILING);
    }

    #[test]
    fn test_labels_and_colors() {
        let colors: Vec<&str> = AqiCategory::ALL.iter().map(|c| c.color()).collect();
        assert_eq!(
            colors,
            ["green", "yellow", "orange", "red", "purple", "maroon"]
        );
        assert_eq!(
            AqiCategory::UnhealthyForSensitiveGroups.to_string(),
            "Unhealthy for Sensitive Groups"
        );
    }

    #[test]
    fn test_serializes_as_label() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_string(&AqiCategory::VeryUnhealthy)?,
            "\"Very Unhealthy\""
        );
        assert_eq!(
            serde_json::to_string(&AqiCategory::UnhealthyForSensitiveGroups)?,
            "\"Unhealthy for Sensitive Groups\""
        );
        Ok(())
    }
}
