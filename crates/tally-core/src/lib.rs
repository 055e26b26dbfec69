//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Transaction ledger (SQLite) with sample seed and recurrence registration
//! - Budget limits persisted as a JSON file
//! - Analytics engine: budget check, anomalies, recurring expenses,
//!   annual projection and month-over-month comparison
//! - Analytics configuration with embedded defaults
//! - CSV/JSON export and report bundles

pub mod analytics;
pub mod budget;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;

pub use analytics::{
    AnalyticsEngine, AnnualProjection, AnomalyReport, BudgetAlertReport, BudgetReport,
    BudgetStatus, CeilingVerdict, ComparisonOutcome, FullReport, MonthComparison,
};
pub use budget::{default_limits, BudgetStore};
pub use config::AnalyticsConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use export::{ExportFormat, ReportBundle};
pub use models::{BudgetLimits, NewTransaction, Recurrence, Transaction, TransactionKind};
