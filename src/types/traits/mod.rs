pub mod any_date;
pub mod types;
pub mod utils;
