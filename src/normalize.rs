use chrono::NaiveDate;
use log::debug;

use crate::error::{DashboardError, Result};
use crate::schema::{DisplayColumn, PaymentRecord};
use crate::source::RawTable;

pub const DATE_COLUMN: &str = "Date";
pub const SENDER_COLUMN: &str = "Sender";
pub const AMOUNT_COLUMN: &str = "Amount";
pub const DOCTOR_COLUMN: &str = "Doctor";

/// Formats the tolerant date parser accepts, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Converts raw sheet rows into typed payment records.
///
/// Columns are located by trimmed header name, not position. A missing `Date`
/// or `Amount` column is fatal, as is a row whose cell count differs from the
/// header. Per-row failures are absorbed: a row with an empty or unparseable
/// date is dropped, an unparseable amount becomes `None` and sums as zero.
/// Output order matches input order.
pub fn normalize(table: &RawTable) -> Result<Vec<PaymentRecord>> {
    let date_col = require_column(&table.headers, DATE_COLUMN)?;
    let amount_col = require_column(&table.headers, AMOUNT_COLUMN)?;
    let sender_col = find_column(&table.headers, SENDER_COLUMN);
    let doctor_col = find_column(&table.headers, DOCTOR_COLUMN);

    let mut records = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        if row.len() != table.headers.len() {
            return Err(DashboardError::RaggedRow {
                row: idx,
                expected: table.headers.len(),
                actual: row.len(),
            });
        }

        let raw_date = row[date_col].trim();
        if raw_date.is_empty() {
            debug!("Dropping row {}: empty date", idx);
            continue;
        }
        let date = match parse_payment_date(raw_date) {
            Some(date) => date,
            None => {
                debug!("Dropping row {}: unparseable date '{}'", idx, raw_date);
                continue;
            }
        };

        let amount = parse_amount(&row[amount_col]);
        if amount.is_none() {
            debug!(
                "Row {}: amount '{}' did not parse, sums as zero",
                idx, row[amount_col]
            );
        }

        records.push(PaymentRecord {
            date,
            sender: cell_or_default(row, sender_col),
            amount,
            doctor: cell_or_default(row, doctor_col),
        });
    }

    Ok(records)
}

/// Which of the fixed display columns the source actually provides.
pub fn present_columns(headers: &[String]) -> Vec<DisplayColumn> {
    DisplayColumn::ALL
        .iter()
        .copied()
        .filter(|col| find_column(headers, col.header()).is_some())
        .collect()
}

/// Parses a currency cell: strips one leading `$` and every `,`, then parses
/// the remainder as a decimal number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s.strip_prefix('$').unwrap_or(s);
    let s: String = s.chars().filter(|c| *c != ',').collect();
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}

/// Tolerant date parser for the formats that show up in the sheet.
pub fn parse_payment_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn require_column(headers: &[String], name: &str) -> Result<usize> {
    find_column(headers, name).ok_or_else(|| DashboardError::MissingColumn {
        column: name.to_string(),
    })
}

fn cell_or_default(row: &[String], col: Option<usize>) -> String {
    col.map(|c| row[c].trim().to_string()).unwrap_or_default()
}
