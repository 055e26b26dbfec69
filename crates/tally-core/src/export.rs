//! Export functionality for the ledger and analysis reports
//!
//! Supports:
//! - Transaction CSV export for spreadsheets
//! - JSON export of transactions and the full analysis report
//! - Report bundles (CSV + JSON artifacts written into a directory)

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::analytics::{BudgetReport, FullReport};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::Transaction;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::InvalidInput(format!(
                "Unknown export format: {} (expected csv or json)",
                other
            ))),
        }
    }
}

/// Files written by [`write_report_bundle`]
#[derive(Debug, Clone, Default)]
pub struct ReportBundle {
    pub transactions_csv: PathBuf,
    pub budget_csv: PathBuf,
    pub report_json: PathBuf,
}

impl ReportBundle {
    pub fn paths(&self) -> [&Path; 3] {
        [
            self.transactions_csv.as_path(),
            self.budget_csv.as_path(),
            self.report_json.as_path(),
        ]
    }
}

impl Database {
    /// Export the whole ledger in the given format
    pub fn export_transactions(&self, format: ExportFormat) -> Result<String> {
        let transactions = self.list_transactions()?;
        match format {
            ExportFormat::Csv => transactions_to_csv(&transactions),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(&transactions)?),
        }
    }
}

/// Render transactions as CSV (`id,date,description,category,amount,kind`)
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "date", "description", "category", "amount", "kind"])?;

    for tx in transactions {
        writer.write_record([
            tx.id.to_string(),
            tx.date.format("%Y-%m-%d").to_string(),
            tx.description.clone(),
            tx.category.clone(),
            format!("{:.2}", tx.amount),
            tx.kind.as_str().to_string(),
        ])?;
    }

    finish(writer)
}

/// Render budget lines as CSV (`category,limit,spent,percentage,status`)
pub fn budget_to_csv(report: &BudgetReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["category", "limit", "spent", "percentage", "status"])?;

    for line in &report.lines {
        writer.write_record([
            line.category.clone(),
            format!("{:.2}", line.limit),
            format!("{:.2}", line.spent),
            line.percentage
                .map(|p| format!("{:.1}", p))
                .unwrap_or_default(),
            line.status.as_str().to_string(),
        ])?;
    }

    finish(writer)
}

pub fn report_to_json(report: &FullReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the ledger CSV, the budget CSV and the JSON report into `dir`
pub fn write_report_bundle(
    dir: &Path,
    transactions: &[Transaction],
    report: &FullReport,
) -> Result<ReportBundle> {
    fs::create_dir_all(dir)?;

    let bundle = ReportBundle {
        transactions_csv: dir.join("transactions.csv"),
        budget_csv: dir.join("budget.csv"),
        report_json: dir.join("report.json"),
    };

    fs::write(&bundle.transactions_csv, transactions_to_csv(transactions)?)?;
    fs::write(&bundle.budget_csv, budget_to_csv(&report.alerts.budget)?)?;
    fs::write(&bundle.report_json, report_to_json(report)?)?;

    info!(dir = %dir.display(), "Report bundle written");
    Ok(bundle)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}
