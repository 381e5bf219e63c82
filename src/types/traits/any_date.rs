use crate::types::traits::types::{DateRange, Month, Year};
use crate::types::traits::utils::days_in_month;
use chrono::NaiveDate;

/// Anything that resolves to an inclusive span of calendar dates.
///
/// When used as the start of a filter the first day of the span is taken, when used as
/// the end the last day is taken. So `get_range(Year(2015), Month(2016, 2))` covers
/// 2015-01-01 through 2016-02-29.
pub trait AnyDate {
    fn get_date_range(self) -> Option<DateRange>;
}

impl AnyDate for NaiveDate {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange::single(self))
    }
}

impl AnyDate for DateRange {
    fn get_date_range(self) -> Option<DateRange> {
        Some(self)
    }
}

impl AnyDate for &str {
    fn get_date_range(self) -> Option<DateRange> {
        NaiveDate::parse_from_str(self.trim(), "%Y-%m-%d")
            .ok()
            .map(DateRange::single)
    }
}

impl AnyDate for String {
    fn get_date_range(self) -> Option<DateRange> {
        self.as_str().get_date_range()
    }
}

impl AnyDate for Year {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl AnyDate for Month {
    fn get_date_range(self) -> Option<DateRange> {
        let year = self.year();
        let month = self.month();
        Some(DateRange {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}
