use crate::error::AirQualityError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A whole calendar year, e.g. `Year(2016)` for 2016-01-01 through 2016-12-31.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

/// One month of a year as `Month(year, month)`, month numbered from 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);
impl Month {
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
}

/// An inclusive `[start, end]` interval of calendar dates.
///
/// Constructed through [`DateRange::new`], which rejects `start > end`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, returning [`AirQualityError::InvalidDateRange`] when `start` is
    /// after `end`.
    ///
    /// ```rust
    /// use air_quality_dashboard::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let jan_1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let jan_7 = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    /// assert!(DateRange::new(jan_1, jan_7).is_ok());
    /// assert!(DateRange::new(jan_7, jan_1).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AirQualityError> {
        if start > end {
            return Err(AirQualityError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_rejects_reversed_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        match DateRange::new(start, end) {
            Err(AirQualityError::InvalidDateRange { start: s, end: e }) => {
                assert_eq!((s, e), (start, end));
            }
            other => panic!("expected InvalidDateRange, got {other:?}"),
        }
    }

    #[test]
    fn test_date_range_display() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let range = DateRange::new(start, end).unwrap();
        assert_eq!(range.to_string(), "2024-03-01 to 2024-03-03");
        assert_eq!(DateRange::single(start).to_string(), "2024-03-01 to 2024-03-01");
    }
}
