//! Analytics engine - runs the analyses with an injected configuration

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::models::{validate_month, BudgetLimits, Transaction};

use super::aggregation;
use super::anomaly;
use super::comparison;
use super::projection;
use super::recurring;
use super::types::{
    AnnualProjection, AnomalyReport, BudgetAlertReport, BudgetReport, CategoryAggregate,
    FullReport, MonthComparison, RecurringClassification,
};

/// Entry point for every analysis
///
/// The engine holds no ledger state: callers pass the transactions (and the
/// budget limits, where relevant) on every call.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Restrict to one month of the tracked year, or keep everything
    pub fn filter_month(
        &self,
        transactions: &[Transaction],
        month: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        let Some(month) = month else {
            return Ok(transactions.to_vec());
        };
        validate_month(month)?;

        let year = self.config.year();
        Ok(transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .cloned()
            .collect())
    }

    pub fn category_totals(&self, transactions: &[Transaction]) -> CategoryAggregate {
        aggregation::category_totals(transactions)
    }

    /// Budget check, optionally for a single month
    pub fn budget_check(
        &self,
        transactions: &[Transaction],
        limits: &BudgetLimits,
        month: Option<u32>,
    ) -> Result<BudgetReport> {
        let scoped = self.filter_month(transactions, month)?;
        let mut report = aggregation::budget_check(&scoped, limits, self.config.warning_ratio);
        report.month = month;

        debug!(
            month = ?month,
            total_debit = report.total_debit,
            alerts = report.alerts().count(),
            "Budget check complete"
        );
        Ok(report)
    }

    /// Budget check plus anomalies over the same transactions
    pub fn budget_alerts(
        &self,
        transactions: &[Transaction],
        limits: &BudgetLimits,
        month: Option<u32>,
    ) -> Result<BudgetAlertReport> {
        let scoped = self.filter_month(transactions, month)?;
        let mut budget = aggregation::budget_check(&scoped, limits, self.config.warning_ratio);
        budget.month = month;
        let anomalies = anomaly::detect_anomalies(&scoped, self.config.budget_anomaly_sensitivity);

        Ok(BudgetAlertReport { budget, anomalies })
    }

    /// Anomaly detection with an explicit sensitivity
    pub fn detect_anomalies(&self, transactions: &[Transaction], sensitivity: f64) -> AnomalyReport {
        anomaly::detect_anomalies(transactions, sensitivity)
    }

    pub fn classify_recurring(&self, transactions: &[Transaction]) -> RecurringClassification {
        recurring::classify_recurring(transactions, self.config.strict_recurring_amounts)
    }

    pub fn project_annual(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Result<AnnualProjection> {
        projection::project_annual(transactions, today, &self.config)
    }

    /// Compare two months of the tracked year
    pub fn compare_months(
        &self,
        transactions: &[Transaction],
        previous_month: u32,
        current_month: u32,
    ) -> Result<MonthComparison> {
        comparison::compare_months(
            transactions,
            self.config.year(),
            previous_month,
            current_month,
        )
    }

    /// Run every analysis over the whole ledger
    ///
    /// A projection without enough data is recorded as skipped instead of
    /// failing the report.
    pub fn full_report(
        &self,
        transactions: &[Transaction],
        limits: &BudgetLimits,
        today: NaiveDate,
    ) -> Result<FullReport> {
        let alerts = self.budget_alerts(transactions, limits, None)?;
        let recurring = self.classify_recurring(transactions).recurring;

        let (projection, projection_skipped) = match self.project_annual(transactions, today) {
            Ok(p) => (Some(p), None),
            Err(e) if e.is_insufficient_data() => {
                info!("Projection skipped: {}", e);
                (None, Some(e.to_string()))
            }
            Err(e) => return Err(e),
        };

        Ok(FullReport {
            today,
            transaction_count: transactions.len(),
            alerts,
            recurring,
            projection,
            projection_skipped,
        })
    }
}
