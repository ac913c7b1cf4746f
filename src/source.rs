use std::cell::RefCell;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One fetched table: the header row plus every data row, all raw strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { headers, rows }
    }

    /// True when the table has no data rows (the header row does not count).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Names of the workbook and the worksheet within it that hold the payment
/// log. Injected into the pipeline entry point, never hardcoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub workbook: String,
    pub worksheet: String,
}

impl SheetConfig {
    pub fn new(workbook: impl Into<String>, worksheet: impl Into<String>) -> Self {
        SheetConfig {
            workbook: workbook.into(),
            worksheet: worksheet.into(),
        }
    }
}

/// Boundary to the hosted spreadsheet service.
///
/// Implementations own connection and authentication details; the pipeline
/// only ever sees rows. A failed fetch or a missing worksheet maps to
/// [`DashboardError::SourceUnavailable`](crate::DashboardError::SourceUnavailable).
pub trait RecordSource {
    fn fetch(&self, config: &SheetConfig) -> Result<RawTable>;
}

/// In-memory source over a prebuilt table. Used by tests and by callers that
/// already hold rows.
#[derive(Debug, Clone)]
pub struct StaticTable(pub RawTable);

impl RecordSource for StaticTable {
    fn fetch(&self, _config: &SheetConfig) -> Result<RawTable> {
        Ok(self.0.clone())
    }
}

/// Caches the fetched table across pipeline reruns.
///
/// The connection behind `inner` is long-lived; every dashboard interaction
/// reruns the pipeline but only the first run (or the first after
/// [`invalidate`](Self::invalidate)) actually reaches the source. There is
/// exactly one logical worker, so `RefCell` is enough.
pub struct CachedSource<S> {
    inner: S,
    cache: RefCell<Option<RawTable>>,
}

impl<S: RecordSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        CachedSource {
            inner,
            cache: RefCell::new(None),
        }
    }

    pub fn fetch(&self, config: &SheetConfig) -> Result<RawTable> {
        if let Some(table) = self.cache.borrow().as_ref() {
            debug!(
                "Serving {} cached rows for worksheet '{}'",
                table.rows.len(),
                config.worksheet
            );
            return Ok(table.clone());
        }

        let table = self.inner.fetch(config)?;
        info!(
            "Fetched {} rows from '{}' / '{}'",
            table.rows.len(),
            config.workbook,
            config.worksheet
        );
        *self.cache.borrow_mut() = Some(table.clone());
        Ok(table)
    }

    /// Force refresh: drops the cached table so the next fetch goes back to
    /// the source.
    pub fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        table: RawTable,
        fetches: Cell<usize>,
    }

    impl RecordSource for CountingSource {
        fn fetch(&self, _config: &SheetConfig) -> Result<RawTable> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.table.clone())
        }
    }

    fn sample_table() -> RawTable {
        RawTable::new(
            vec!["Date".to_string(), "Amount".to_string()],
            vec![vec!["2025-11-01".to_string(), "100".to_string()]],
        )
    }

    #[test]
    fn test_fetch_is_cached_until_invalidated() {
        let source = CountingSource {
            table: sample_table(),
            fetches: Cell::new(0),
        };
        let cached = CachedSource::new(source);
        let config = SheetConfig::new("Payments Demo", "Payments");

        let first = cached.fetch(&config).unwrap();
        let second = cached.fetch(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.inner.fetches.get(), 1);

        cached.invalidate();
        cached.fetch(&config).unwrap();
        assert_eq!(cached.inner.fetches.get(), 2);
    }

    #[test]
    fn test_static_table_ignores_config() {
        let source = StaticTable(sample_table());
        let table = source
            .fetch(&SheetConfig::new("anything", "anything"))
            .unwrap();
        assert_eq!(table.rows.len(), 1);
    }
}
