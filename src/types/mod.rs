pub mod aqi_category;
pub mod measurement;
pub mod measurement_frame;
pub mod pollutant;
pub mod traits;
