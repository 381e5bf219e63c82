mod aggregation;
mod dashboard;
mod dataset;
mod error;
mod filtering;
mod render;
mod types;

pub use dashboard::*;
pub use error::AirQualityError;

pub use aggregation::daily_aqi::{aggregate_daily_aqi, DailyAqi};
pub use aggregation::daily_pollutants::{aggregate_daily_pollutants, DailyPollutants};
pub use aggregation::station_ranking::{aggregate_station_ranking, StationRanking};
pub use aggregation::summary::Summary;

pub use dataset::error::DatasetError;
pub use dataset::loader::DatasetLoader;
pub use filtering::MeasurementFrameFilterExt;

pub use render::html::render_html;
pub use render::table::*;
pub use render::NO_DATA;

pub use types::aqi_category::*;
pub use types::measurement::{Measurement, PollutantLevels};
pub use types::measurement_frame::MeasurementLazyFrame;
pub use types::pollutant::{Pollutant, AQI_COLUMN, DATE_COLUMN, STATION_COLUMN};

pub use types::traits::any_date::AnyDate;
pub use types::traits::types::DateRange;
pub use types::traits::types::Month;
pub use types::traits::types::Year;
