use crate::types::pollutant::Pollutant;
use chrono::NaiveDate;
use serde::Serialize;

/// Pollutant concentrations for one record, day or summary, one slot per channel.
#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub struct PollutantLevels<T> {
    #[serde(rename = "PM2_5")]
    pub pm2_5: Option<T>,
    #[serde(rename = "PM10")]
    pub pm10: Option<T>,
    #[serde(rename = "SO2")]
    pub so2: Option<T>,
    #[serde(rename = "NO2")]
    pub no2: Option<T>,
    #[serde(rename = "CO")]
    pub co: Option<T>,
    #[serde(rename = "O3")]
    pub o3: Option<T>,
}

impl<T: Copy> PollutantLevels<T> {
    pub fn get(&self, pollutant: Pollutant) -> Option<T> {
        match pollutant {
            Pollutant::Pm2_5 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
            Pollutant::So2 => self.so2,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    pub fn set(&mut self, pollutant: Pollutant, value: Option<T>) {
        let slot = match pollutant {
            Pollutant::Pm2_5 => &mut self.pm2_5,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::So2 => &mut self.so2,
            Pollutant::No2 => &mut self.no2,
            Pollutant::Co => &mut self.co,
            Pollutant::O3 => &mut self.o3,
        };
        *slot = value;
    }
}

/// One row of the measurement dataset.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Measurement {
    pub date: NaiveDate,
    pub station: String,
    #[serde(rename = "avg_AQI")]
    pub aqi: Option<f64>,
    #[serde(flatten)]
    pub pollutants: PollutantLevels<f64>,
}
