//! Renders the default month view of a CSV-backed payment log to stdout.
//!
//! Usage: `cargo run --example csv_dashboard [path/to/payments.csv]`

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use payment_dashboard::{
    format_currency, Dashboard, DashboardError, DisplayColumn, LoadOutcome, RawTable,
    RecordSource, SheetConfig,
};

/// A local CSV file standing in for the hosted spreadsheet.
struct CsvSource {
    path: PathBuf,
}

impl RecordSource for CsvSource {
    fn fetch(&self, _config: &SheetConfig) -> payment_dashboard::Result<RawTable> {
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| DashboardError::SourceUnavailable(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| DashboardError::SourceUnavailable(e.to_string()))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| DashboardError::SourceUnavailable(e.to_string()))?;
            rows.push(row.iter().map(String::from).collect());
        }

        Ok(RawTable::new(headers, rows))
    }
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/payments.csv"));

    let dashboard = Dashboard::new(
        CsvSource { path },
        SheetConfig::new("Payments Demo", "Payments"),
    );

    let data = match dashboard.load()? {
        LoadOutcome::Empty => {
            println!("Sheet is empty.");
            return Ok(());
        }
        LoadOutcome::Data(data) => data,
    };

    let months = data.months();
    let today = Local::now().date_naive();
    let label = months
        .default_label(today)
        .context("month catalog is empty")?
        .to_string();
    let view = data.month_view(&label);

    println!("Income for {}", label);
    println!("  Total Received  {}", format_currency(view.totals.grand));
    println!("  Dr. Tripic      {}", format_currency(view.totals.tripic));
    println!("  Dr. Cartagena   {}", format_currency(view.totals.cartagena));
    println!();

    println!("Payment Log");
    for record in &view.records {
        let mut cells = Vec::new();
        for column in data.columns() {
            match column {
                DisplayColumn::Date => cells.push(record.date.format("%Y-%m-%d").to_string()),
                DisplayColumn::Sender => cells.push(record.sender.clone()),
                DisplayColumn::Amount => cells.push(
                    record
                        .amount
                        .map(format_currency)
                        .unwrap_or_else(|| "-".to_string()),
                ),
                DisplayColumn::Doctor => cells.push(record.doctor.clone()),
            }
        }
        println!("  {}", cells.join("  |  "));
    }

    Ok(())
}
