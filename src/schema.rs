use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::partition;

/// One normalized row of the payment log.
///
/// `amount` is `None` when the sheet cell did not parse as a number. The row
/// stays visible in tables and contributes zero to every sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Calendar date the payment was received.
    pub date: NaiveDate,

    /// Free-text identifier of the payer.
    pub sender: String,

    /// Decimal currency value, `None` if the source cell was unparseable.
    pub amount: Option<f64>,

    /// Free-text doctor label used for substring-based categorization.
    pub doctor: String,
}

impl PaymentRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Full English month name, independent of the runtime locale.
    pub fn month_name(&self) -> &'static str {
        partition::month_name(self.date.month())
    }

    /// Composite partition label, e.g. "November 2025".
    pub fn month_year_label(&self) -> String {
        partition::month_year_label(self.date)
    }
}

/// The fixed display projection for the payment log table.
///
/// The normalizer reports which of these the source actually provided so a
/// consumer can drop absent columns instead of rendering blanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayColumn {
    Date,
    Sender,
    Amount,
    Doctor,
}

impl DisplayColumn {
    pub const ALL: [DisplayColumn; 4] = [
        DisplayColumn::Date,
        DisplayColumn::Sender,
        DisplayColumn::Amount,
        DisplayColumn::Doctor,
    ];

    /// Header name this column is located by in the source table.
    pub fn header(&self) -> &'static str {
        match self {
            DisplayColumn::Date => "Date",
            DisplayColumn::Sender => "Sender",
            DisplayColumn::Amount => "Amount",
            DisplayColumn::Doctor => "Doctor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate) -> PaymentRecord {
        PaymentRecord {
            date,
            sender: "Alice".to_string(),
            amount: Some(100.0),
            doctor: "Dr. Tripic".to_string(),
        }
    }

    #[test]
    fn test_derived_partition_keys() {
        let r = record(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(r.year(), 2025);
        assert_eq!(r.month_name(), "November");
        assert_eq!(r.month_year_label(), "November 2025");
    }

    #[test]
    fn test_serialization_round_trip() {
        let r = record(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        let json = serde_json::to_string(&r).unwrap();
        let back: PaymentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
