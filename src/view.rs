use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::Totals;
use crate::partition::{month_index, month_year_label, parse_month_year_label};
use crate::schema::PaymentRecord;

/// Distinct "Month Year" labels present in the data, most recent first.
/// Backs the flat month selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCatalog {
    labels: Vec<String>,
}

impl MonthCatalog {
    pub fn from_records(records: &[PaymentRecord]) -> Self {
        Self::from_labels(records.iter().map(|r| r.month_year_label()).collect())
    }

    /// Dedups and orders labels descending by actual calendar time. Labels
    /// are parsed back to dates for the comparison, never compared as
    /// strings.
    pub fn from_labels(mut labels: Vec<String>) -> Self {
        labels.sort();
        labels.dedup();
        labels.sort_by_key(|label| {
            Reverse(parse_month_year_label(label).unwrap_or(NaiveDate::MIN))
        });
        MonthCatalog { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of the label to pre-select: the current calendar month when the
    /// sheet has rows for it, otherwise the most recent month available.
    pub fn default_index(&self, today: NaiveDate) -> usize {
        let current = month_year_label(today);
        self.labels.iter().position(|l| *l == current).unwrap_or(0)
    }

    pub fn default_label(&self, today: NaiveDate) -> Option<&str> {
        self.labels.get(self.default_index(today)).map(String::as_str)
    }
}

/// Distinct calendar years present in the data, most recent first. Backs the
/// year selector of the year + month view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCatalog {
    years: Vec<i32>,
}

impl YearCatalog {
    pub fn from_records(records: &[PaymentRecord]) -> Self {
        let mut years: Vec<i32> = records.iter().map(|r| r.year()).collect();
        years.sort_unstable();
        years.dedup();
        years.reverse();
        YearCatalog { years }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// The most recent year, pre-selected by default.
    pub fn default_year(&self) -> Option<i32> {
        self.years.first().copied()
    }
}

/// Month filter within a selected year. `AllMonths` keeps every record of
/// the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthChoice {
    AllMonths,
    Month(String),
}

impl MonthChoice {
    pub fn label(&self) -> &str {
        match self {
            MonthChoice::AllMonths => "All Months",
            MonthChoice::Month(name) => name,
        }
    }
}

/// Candidate month filters for `year`: the synthetic "All Months" option
/// first, then the month names present within that year's records in
/// calendar order.
pub fn month_choices(records: &[PaymentRecord], year: i32) -> Vec<MonthChoice> {
    let mut names: Vec<&'static str> = records
        .iter()
        .filter(|r| r.year() == year)
        .map(|r| r.month_name())
        .collect();
    names.sort_by_key(|name| month_index(name));
    names.dedup();

    let mut choices = Vec::with_capacity(names.len() + 1);
    choices.push(MonthChoice::AllMonths);
    choices.extend(names.into_iter().map(|n| MonthChoice::Month(n.to_string())));
    choices
}

/// A filtered slice of the record set with its metric totals, ready for the
/// widget layer. Records are sorted by date descending, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyView {
    pub title: String,
    pub records: Vec<PaymentRecord>,
    pub totals: Totals,
}

impl MonthlyView {
    fn build(title: String, mut records: Vec<PaymentRecord>) -> Self {
        records.sort_by_key(|r| Reverse(r.date));
        let totals = Totals::compute(&records);
        MonthlyView {
            title,
            records,
            totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Flat month mode: every record carrying the given "Month Year" label.
pub fn month_view(records: &[PaymentRecord], label: &str) -> MonthlyView {
    let selected = records
        .iter()
        .filter(|r| r.month_year_label() == label)
        .cloned()
        .collect();
    MonthlyView::build(label.to_string(), selected)
}

/// Year + month mode: records of `year`, optionally narrowed to one month.
pub fn year_view(records: &[PaymentRecord], year: i32, choice: &MonthChoice) -> MonthlyView {
    let selected = records
        .iter()
        .filter(|r| r.year() == year)
        .filter(|r| match choice {
            MonthChoice::AllMonths => true,
            MonthChoice::Month(name) => r.month_name().eq_ignore_ascii_case(name),
        })
        .cloned()
        .collect();

    let title = match choice {
        MonthChoice::AllMonths => year.to_string(),
        MonthChoice::Month(name) => format!("{} {}", name, year),
    };
    MonthlyView::build(title, selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32, amount: f64) -> PaymentRecord {
        PaymentRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            sender: "Alice".to_string(),
            amount: Some(amount),
            doctor: "Dr. Tripic".to_string(),
        }
    }

    #[test]
    fn test_month_labels_are_in_calendar_order_not_alphabetical() {
        let catalog = MonthCatalog::from_labels(vec![
            "January 2024".to_string(),
            "December 2025".to_string(),
            "June 2025".to_string(),
        ]);
        assert_eq!(
            catalog.labels(),
            &["December 2025", "June 2025", "January 2024"]
        );
    }

    #[test]
    fn test_catalog_dedups_labels() {
        let records = vec![
            record(2025, 11, 1, 100.0),
            record(2025, 11, 15, 50.0),
            record(2025, 6, 3, 25.0),
        ];
        let catalog = MonthCatalog::from_records(&records);
        assert_eq!(catalog.labels(), &["November 2025", "June 2025"]);
    }

    #[test]
    fn test_default_month_is_current_when_present() {
        let catalog = MonthCatalog::from_labels(vec![
            "November 2025".to_string(),
            "October 2025".to_string(),
        ]);
        let today = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        assert_eq!(catalog.default_label(today), Some("October 2025"));
    }

    #[test]
    fn test_default_month_falls_back_to_most_recent() {
        let catalog = MonthCatalog::from_labels(vec![
            "November 2025".to_string(),
            "October 2025".to_string(),
        ]);
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(catalog.default_label(today), Some("November 2025"));
    }

    #[test]
    fn test_year_catalog_descending_with_default() {
        let records = vec![
            record(2024, 1, 1, 10.0),
            record(2025, 6, 1, 20.0),
            record(2024, 3, 1, 30.0),
        ];
        let catalog = YearCatalog::from_records(&records);
        assert_eq!(catalog.years(), &[2025, 2024]);
        assert_eq!(catalog.default_year(), Some(2025));
    }

    #[test]
    fn test_month_choices_calendar_order_with_all_months_first() {
        let records = vec![
            record(2025, 11, 1, 10.0),
            record(2025, 2, 1, 20.0),
            record(2025, 11, 20, 30.0),
            record(2024, 7, 1, 40.0),
        ];
        let choices = month_choices(&records, 2025);
        assert_eq!(
            choices,
            vec![
                MonthChoice::AllMonths,
                MonthChoice::Month("February".to_string()),
                MonthChoice::Month("November".to_string()),
            ]
        );
    }

    #[test]
    fn test_month_view_filters_by_label() {
        let records = vec![
            record(2025, 11, 1, 100.0),
            record(2025, 11, 15, 50.0),
            record(2025, 10, 1, 25.0),
        ];
        let view = month_view(&records, "November 2025");
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.totals.grand, 150.0);
        assert_eq!(view.title, "November 2025");
    }

    #[test]
    fn test_view_records_sorted_most_recent_first() {
        let records = vec![
            record(2025, 11, 1, 100.0),
            record(2025, 11, 20, 50.0),
            record(2025, 11, 10, 25.0),
        ];
        let view = month_view(&records, "November 2025");
        let days: Vec<u32> = view
            .records
            .iter()
            .map(|r| chrono::Datelike::day(&r.date))
            .collect();
        assert_eq!(days, vec![20, 10, 1]);
    }

    #[test]
    fn test_year_view_all_months_keeps_whole_year() {
        let records = vec![
            record(2025, 11, 1, 100.0),
            record(2025, 2, 1, 50.0),
            record(2024, 7, 1, 25.0),
        ];
        let view = year_view(&records, 2025, &MonthChoice::AllMonths);
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.totals.grand, 150.0);
        assert_eq!(view.title, "2025");
    }

    #[test]
    fn test_year_view_single_month() {
        let records = vec![record(2025, 11, 1, 100.0), record(2025, 2, 1, 50.0)];
        let view = year_view(&records, 2025, &MonthChoice::Month("February".to_string()));
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.totals.grand, 50.0);
        assert_eq!(view.title, "February 2025");
    }
}
