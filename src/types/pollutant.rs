//! Defines the pollutant channels present in every measurement record and the
//! column layout of the measurement dataset.

use serde::Serialize;
use std::fmt;

/// Name of the calendar date column.
pub const DATE_COLUMN: &str = "date";
/// Name of the monitoring station column.
pub const STATION_COLUMN: &str = "station";
/// Name of the Air Quality Index column.
pub const AQI_COLUMN: &str = "avg_AQI";

/// One of the six individually measured pollutant concentrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pollutant {
    /// Fine particulate matter (diameter below 2.5 µm).
    #[serde(rename = "PM2_5")]
    Pm2_5,
    /// Coarse particulate matter (diameter below 10 µm).
    #[serde(rename = "PM10")]
    Pm10,
    /// Sulphur dioxide.
    #[serde(rename = "SO2")]
    So2,
    /// Nitrogen dioxide.
    #[serde(rename = "NO2")]
    No2,
    /// Carbon monoxide.
    #[serde(rename = "CO")]
    Co,
    /// Ozone.
    #[serde(rename = "O3")]
    O3,
}

impl Pollutant {
    /// All channels in dataset column order.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm2_5,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column name of this channel in the dataset.
    pub fn column(self) -> &'static str {
        match self {
            Pollutant::Pm2_5 => "PM2_5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    /// Label shown on metric tiles.
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm2_5 => "PM 2.5",
            Pollutant::Pm10 => "PM 10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Column names every measurement dataset must provide, in canonical order.
pub(crate) fn get_schema_column_names() -> Vec<&'static str> {
    let mut names = vec![DATE_COLUMN, STATION_COLUMN, AQI_COLUMN];
    names.extend(Pollutant::ALL.iter().map(|p| p.column()));
    names
}
