//! # Payment Dashboard
//!
//! The data pipeline behind a small payment-reporting dashboard: rows come
//! out of a hosted spreadsheet, get normalized into typed [`PaymentRecord`]s
//! and are partitioned by calendar month for filtered views with per-doctor
//! totals.
//!
//! ## Core Concepts
//!
//! - **Record Source**: the boundary to the spreadsheet service. One fetch
//!   returns the header row plus all data rows as strings.
//! - **Normalization**: raw rows become typed records. Rows without a
//!   parseable date are dropped, unparseable amounts sum as zero.
//! - **Partition key**: each record derives its year, month name and a
//!   "November 2025" style label from its date.
//! - **Views**: the presentation layer picks a month (or a year and a month)
//!   and receives the filtered records, date-descending, with the grand
//!   total and the two doctor splits.
//!
//! The pipeline is rerun in full on every interaction. Only the fetch is
//! cached, and [`Dashboard::force_refresh`] drops that cache.
//!
//! ## Example
//!
//! ```rust,ignore
//! use payment_dashboard::*;
//! use chrono::Local;
//!
//! let table = RawTable::new(
//!     vec!["Date".into(), "Sender".into(), "Amount".into(), "Doctor".into()],
//!     vec![vec![
//!         "2025-11-01".into(),
//!         "Alice".into(),
//!         "$100.00".into(),
//!         "Dr. Tripic".into(),
//!     ]],
//! );
//!
//! let dashboard = Dashboard::new(
//!     StaticTable(table),
//!     SheetConfig::new("EMG Payments", "Payments"),
//! );
//!
//! match dashboard.load().unwrap() {
//!     LoadOutcome::Empty => println!("Sheet is empty."),
//!     LoadOutcome::Data(data) => {
//!         let months = data.months();
//!         let today = Local::now().date_naive();
//!         let label = months.default_label(today).unwrap().to_string();
//!         let view = data.month_view(&label);
//!         println!("{}: {}", label, format_currency(view.totals.grand));
//!     }
//! }
//! ```

pub mod aggregate;
pub mod error;
pub mod fmt;
pub mod normalize;
pub mod partition;
pub mod schema;
pub mod source;
pub mod view;

pub use aggregate::{doctor_total, total, Totals, CARTAGENA_FRAGMENT, TRIPIC_FRAGMENT};
pub use error::{DashboardError, Result};
pub use fmt::format_currency;
pub use normalize::{normalize, parse_amount, parse_payment_date, present_columns};
pub use partition::{
    month_index, month_name, month_year_label, parse_month_year_label, MONTH_NAMES,
};
pub use schema::{DisplayColumn, PaymentRecord};
pub use source::{CachedSource, RawTable, RecordSource, SheetConfig, StaticTable};
pub use view::{month_choices, MonthCatalog, MonthChoice, MonthlyView, YearCatalog};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Outcome of a pipeline run.
///
/// An empty worksheet, or one where no row survives normalization, is a
/// handled state the widget layer turns into an informational message. It is
/// not an error.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Data(DashboardData),
    Empty,
}

impl LoadOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, LoadOutcome::Empty)
    }

    pub fn data(self) -> Option<DashboardData> {
        match self {
            LoadOutcome::Data(data) => Some(data),
            LoadOutcome::Empty => None,
        }
    }
}

/// The normalized record set handed to the presentation layer, together with
/// the display columns the source actually provided.
///
/// All views re-filter this in-memory set. Nothing here re-fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    records: Vec<PaymentRecord>,
    columns: Vec<DisplayColumn>,
}

impl DashboardData {
    pub fn new(records: Vec<PaymentRecord>, columns: Vec<DisplayColumn>) -> Self {
        DashboardData { records, columns }
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn columns(&self) -> &[DisplayColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Candidate months for the flat month selector, most recent first.
    pub fn months(&self) -> MonthCatalog {
        MonthCatalog::from_records(&self.records)
    }

    /// Candidate years for the year + month selector, most recent first.
    pub fn years(&self) -> YearCatalog {
        YearCatalog::from_records(&self.records)
    }

    /// Candidate month filters within `year`, "All Months" first.
    pub fn month_choices(&self, year: i32) -> Vec<MonthChoice> {
        view::month_choices(&self.records, year)
    }

    /// Flat month mode view for one "Month Year" label.
    pub fn month_view(&self, label: &str) -> MonthlyView {
        view::month_view(&self.records, label)
    }

    /// Year + month mode view.
    pub fn year_view(&self, year: i32, choice: &MonthChoice) -> MonthlyView {
        view::year_view(&self.records, year, choice)
    }

    /// Pre-selected view for the flat month mode: the current month when
    /// present, the most recent month otherwise.
    pub fn default_month_view(&self, today: NaiveDate) -> Option<MonthlyView> {
        let months = self.months();
        months.default_label(today).map(|l| self.month_view(l))
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The pipeline entry point.
///
/// Owns the long-lived source connection behind a cache. Every user
/// interaction triggers a complete [`load`](Self::load); the cache only
/// spares the network round trip, never the recompute.
pub struct Dashboard<S: RecordSource> {
    source: CachedSource<S>,
    config: SheetConfig,
}

impl<S: RecordSource> Dashboard<S> {
    pub fn new(source: S, config: SheetConfig) -> Self {
        Dashboard {
            source: CachedSource::new(source),
            config,
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Runs fetch, normalize and projection for the configured worksheet.
    ///
    /// Fatal conditions propagate: an unreachable source, a missing `Date`
    /// or `Amount` column, a row whose arity differs from the header.
    /// Per-row date and amount failures only drop or zero the offending row.
    pub fn load(&self) -> Result<LoadOutcome> {
        let table = self.source.fetch(&self.config)?;
        if table.is_empty() {
            info!("Worksheet '{}' has no data rows", self.config.worksheet);
            return Ok(LoadOutcome::Empty);
        }

        let records = normalize(&table)?;
        if records.is_empty() {
            info!(
                "No rows survived normalization ({} raw rows)",
                table.rows.len()
            );
            return Ok(LoadOutcome::Empty);
        }
        debug!(
            "Normalized {} of {} raw rows",
            records.len(),
            table.rows.len()
        );

        let columns = present_columns(&table.headers);
        Ok(LoadOutcome::Data(DashboardData::new(records, columns)))
    }

    /// Force refresh: drops the cached table so the next [`load`](Self::load)
    /// re-fetches from the source.
    pub fn force_refresh(&self) {
        self.source.invalidate();
    }
}
