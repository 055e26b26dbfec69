//! Result types produced by the analytics engine
//!
//! All of these are transient: recomputed on every call, never persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category → summed debit amount
pub type CategoryAggregate = BTreeMap<String, f64>;

/// How close a category is to its budget limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Below the warning ratio (or no limit to compare against)
    Ok,
    /// At or above the warning ratio of the limit
    Warning,
    /// At or above the limit
    Critical,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Ok => "OK",
            BudgetStatus::Warning => "WARNING",
            BudgetStatus::Critical => "CRITICAL",
        }
    }

    /// Classify real spend against a limit
    ///
    /// A zero limit cannot be divided by and is always `Ok`.
    pub fn classify(spent: f64, limit: f64, warning_ratio: f64) -> Self {
        if limit <= 0.0 {
            BudgetStatus::Ok
        } else if spent >= limit {
            BudgetStatus::Critical
        } else if spent >= warning_ratio * limit {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(BudgetStatus::Ok),
            "warning" => Ok(BudgetStatus::Warning),
            "critical" => Ok(BudgetStatus::Critical),
            _ => Err(format!("Unknown budget status: {}", s)),
        }
    }
}

/// Spend versus limit for one budgeted category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    /// Spend as a percentage of the limit; `None` when the limit is zero
    pub percentage: Option<f64>,
    pub status: BudgetStatus,
}

/// A category's share of total debit spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Category aggregation and budget check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Month (1-12) the snapshot was filtered to, if any
    pub month: Option<u32>,
    pub total_debit: f64,
    /// One line per budgeted category, in category order
    pub lines: Vec<BudgetLine>,
    /// Every category with spending, largest first
    pub impact: Vec<CategoryShare>,
}

impl BudgetReport {
    /// Lines that are not OK
    pub fn alerts(&self) -> impl Iterator<Item = &BudgetLine> {
        self.lines.iter().filter(|l| l.status != BudgetStatus::Ok)
    }
}

/// mean + k·stddev over a debit amount distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThreshold {
    pub sample_size: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// k
    pub sensitivity: f64,
    pub threshold: f64,
}

/// A debit above the anomaly threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub transaction_id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: f64,
}

/// Outcome of anomaly detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Number of debits examined
    pub sample_size: usize,
    /// `None` when there were too few debits to compute one
    pub threshold: Option<AnomalyThreshold>,
    /// Sorted by amount (largest first), then date, then ID
    pub anomalies: Vec<Anomaly>,
}

impl AnomalyReport {
    pub fn insufficient(sample_size: usize) -> Self {
        Self {
            sample_size,
            threshold: None,
            anomalies: vec![],
        }
    }

    /// True when the sample was too small for statistics
    pub fn is_insufficient(&self) -> bool {
        self.threshold.is_none()
    }
}

/// A description that repeats across the ledger (rent, subscriptions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub description: String,
    /// Category of the latest occurrence
    pub category: String,
    pub mean_amount: f64,
    pub last_occurrence: NaiveDate,
    pub occurrence_count: usize,
}

/// Debits split into recurring groups and one-off variable spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringClassification {
    /// Sorted by description
    pub recurring: Vec<RecurringExpense>,
    /// Debits not belonging to any recurring group, in input order
    pub variable: Vec<crate::models::Transaction>,
}

/// A recurring expense and what it still costs this year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCommitment {
    pub description: String,
    pub category: String,
    pub mean_amount: f64,
    pub last_occurrence: NaiveDate,
    pub months_remaining: u32,
    pub future_cost: f64,
}

/// Year-end projection against the safety ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum CeilingVerdict {
    Within { margin: f64 },
    Over { excess: f64, suggested_daily_cut: f64 },
}

impl CeilingVerdict {
    pub fn is_over(&self) -> bool {
        matches!(self, CeilingVerdict::Over { .. })
    }
}

/// Annual spending forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualProjection {
    pub today: NaiveDate,
    pub year_start: NaiveDate,
    pub year_end: NaiveDate,
    pub elapsed_days: i64,
    pub remaining_days: i64,
    pub fixed_commitments: Vec<FixedCommitment>,
    pub future_fixed_total: f64,
    /// Variable debits to date used for the daily average
    pub variable_sample_size: usize,
    /// Variable debits left out of the daily average as outliers
    pub excluded_outliers: Vec<Anomaly>,
    pub variable_daily_average: f64,
    pub projected_variable: f64,
    pub total_spent_so_far: f64,
    pub final_projection: f64,
    pub monthly_cost_of_living: f64,
    pub safety_ceiling: f64,
    pub verdict: CeilingVerdict,
    /// Unusual expenses of the year at the projection sensitivity
    pub anomalies: AnomalyReport,
}

/// Direction of a month-over-month change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    /// Current month spent less
    Savings,
    /// Current month spent more
    Increase,
    Unchanged,
}

impl ComparisonOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOutcome::Savings => "savings",
            ComparisonOutcome::Increase => "increase",
            ComparisonOutcome::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Debit totals of two months of the tracked year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub year: i32,
    pub previous_month: u32,
    pub current_month: u32,
    pub previous_total: f64,
    pub current_total: f64,
    /// previous − current (positive means savings)
    pub difference: f64,
    /// |difference|
    pub magnitude: f64,
    /// difference / previous · 100, signed like `difference`
    pub percentage: f64,
    pub outcome: ComparisonOutcome,
}

/// Budget check plus the unusual expenses that explain it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlertReport {
    pub budget: BudgetReport,
    pub anomalies: AnomalyReport,
}

/// Everything the engine computes in one pass, for the JSON report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReport {
    pub today: NaiveDate,
    pub transaction_count: usize,
    pub alerts: BudgetAlertReport,
    pub recurring: Vec<RecurringExpense>,
    pub projection: Option<AnnualProjection>,
    /// Why the projection was skipped, when it was
    pub projection_skipped: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_status_classify() {
        assert_eq!(BudgetStatus::classify(0.0, 500.0, 0.8), BudgetStatus::Ok);
        assert_eq!(BudgetStatus::classify(399.99, 500.0, 0.8), BudgetStatus::Ok);
        assert_eq!(BudgetStatus::classify(400.0, 500.0, 0.8), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(499.99, 500.0, 0.8), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(500.0, 500.0, 0.8), BudgetStatus::Critical);
        assert_eq!(BudgetStatus::classify(900.0, 500.0, 0.8), BudgetStatus::Critical);
    }

    #[test]
    fn test_budget_status_zero_limit_is_ok() {
        assert_eq!(BudgetStatus::classify(0.0, 0.0, 0.8), BudgetStatus::Ok);
        assert_eq!(BudgetStatus::classify(120.0, 0.0, 0.8), BudgetStatus::Ok);
    }

    #[test]
    fn test_budget_status_roundtrip() {
        for status in [BudgetStatus::Ok, BudgetStatus::Warning, BudgetStatus::Critical] {
            assert_eq!(status.as_str().parse::<BudgetStatus>().unwrap(), status);
        }
        assert!("fine".parse::<BudgetStatus>().is_err());
    }

    #[test]
    fn test_verdict_serialization() {
        let verdict = CeilingVerdict::Over {
            excess: 100.0,
            suggested_daily_cut: 2.5,
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["verdict"], "over");
        assert_eq!(json["suggested_daily_cut"], 2.5);
        assert!(verdict.is_over());
    }
}
