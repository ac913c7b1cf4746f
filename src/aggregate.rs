use serde::{Deserialize, Serialize};

use crate::schema::PaymentRecord;

/// Substring that attributes a payment to Dr. Tripic.
pub const TRIPIC_FRAGMENT: &str = "Tripic";

/// Substring that attributes a payment to Dr. Cartagena.
pub const CARTAGENA_FRAGMENT: &str = "Cartagena";

/// Sum of all parsed amounts. Unparsed amounts count as zero, the empty set
/// sums to zero.
pub fn total(records: &[PaymentRecord]) -> f64 {
    records.iter().filter_map(|r| r.amount).sum()
}

/// Sum over records whose doctor field contains `fragment` as a
/// case-insensitive, unanchored substring. A record can match more than one
/// fragment.
pub fn doctor_total(records: &[PaymentRecord], fragment: &str) -> f64 {
    let needle = fragment.to_lowercase();
    records
        .iter()
        .filter(|r| r.doctor.to_lowercase().contains(&needle))
        .filter_map(|r| r.amount)
        .sum()
}

/// The three metric sums shown at the top of the dashboard.
///
/// The sums are independent: a record naming both doctors lands in both
/// splits while counting once in the grand total, so the splits need not add
/// up to `grand`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub grand: f64,
    pub tripic: f64,
    pub cartagena: f64,
}

impl Totals {
    pub fn compute(records: &[PaymentRecord]) -> Self {
        Totals {
            grand: total(records),
            tripic: doctor_total(records, TRIPIC_FRAGMENT),
            cartagena: doctor_total(records, CARTAGENA_FRAGMENT),
        }
    }
}
