use chrono::{Datelike, NaiveDate};

use crate::error::{DashboardError, Result};

/// Fixed English month table. Labels and month ordering derive from this
/// list, never from the runtime locale.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full name for a 1-based calendar month (1 = January).
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

/// 0-based calendar index of a month name (January = 0, December = 11).
pub fn month_index(name: &str) -> Option<usize> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name.trim()))
}

/// Composite label in the "November 2025" format.
pub fn month_year_label(date: NaiveDate) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

/// Parses a "Month Year" label back to the first day of that month.
///
/// Labels must be compared as dates; string order would interleave years
/// ("December 2025" sorts before "June 2025" alphabetically).
pub fn parse_month_year_label(label: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = label.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(DashboardError::LabelParse(label.to_string()));
    }

    let month = month_index(parts[0])
        .ok_or_else(|| DashboardError::LabelParse(label.to_string()))? as u32
        + 1;
    let year: i32 = parts[1]
        .parse()
        .map_err(|_| DashboardError::LabelParse(label.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DashboardError::LabelParse(label.to_string()))
}
