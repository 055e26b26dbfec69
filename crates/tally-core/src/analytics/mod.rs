//! Spending analytics
//!
//! Pure functions over a slice of ledger transactions, wrapped by
//! [`AnalyticsEngine`] which carries the configuration:
//!
//! - **Aggregation** - per-category totals and the budget check
//! - **Anomalies** - debits above mean + k·stddev
//! - **Recurring** - fixed expenses grouped by description
//! - **Projection** - year-end spending estimate against a safety ceiling
//! - **Comparison** - month-over-month change
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::analytics::AnalyticsEngine;
//!
//! let engine = AnalyticsEngine::new(AnalyticsConfig::load(None)?);
//! let report = engine.budget_check(&db.list_transactions()?, &limits, Some(1))?;
//! ```

pub mod aggregation;
pub mod anomaly;
pub mod comparison;
pub mod engine;
pub mod projection;
pub mod recurring;
pub mod stats;
pub mod types;

pub use engine::AnalyticsEngine;
pub use projection::MIN_PROJECTION_SAMPLES;
pub use stats::{summarize, DistributionStats, MIN_STATISTICAL_SAMPLES};
pub use types::{
    AnnualProjection, Anomaly, AnomalyReport, AnomalyThreshold, BudgetAlertReport, BudgetLine,
    BudgetReport, BudgetStatus, CategoryAggregate, CategoryShare, CeilingVerdict,
    ComparisonOutcome, FixedCommitment, FullReport, MonthComparison, RecurringClassification,
    RecurringExpense,
};
