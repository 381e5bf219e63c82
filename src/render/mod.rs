//! Output writers for a [`crate::DashboardView`]: a self-contained HTML page and
//! Polars tables for the terminal.

pub mod html;
pub mod table;

/// Text shown in place of an aggregate without data.
pub const NO_DATA: &str = "No data";

pub(crate) fn display_value(value: Option<i64>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}
