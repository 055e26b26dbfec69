//! Annual spending projection
//!
//! Predicts year-end spending as:
//! - what was already spent,
//! - plus recurring expenses still to come,
//! - plus a daily average of "normal" variable spending over the days left.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::models::Transaction;

use super::anomaly::{detect_anomalies, sort_anomalies, to_anomaly};
use super::recurring::classify_recurring;
use super::stats::{summarize, MIN_STATISTICAL_SAMPLES};
use super::types::{AnnualProjection, CeilingVerdict, FixedCommitment, RecurringExpense};

/// Fewest debits needed before a projection is attempted
pub const MIN_PROJECTION_SAMPLES: usize = 2;

/// Days used when turning the variable daily average into a monthly figure
const DAYS_PER_MONTH: f64 = 30.0;

/// Project total spending for the tracked year as seen from `today`
pub fn project_annual(
    transactions: &[Transaction],
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> Result<AnnualProjection> {
    let year_debits: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.is_debit() && t.date >= config.year_start && t.date <= config.year_end)
        .cloned()
        .collect();

    if year_debits.len() < MIN_PROJECTION_SAMPLES {
        return Err(Error::InsufficientData {
            analysis: "annual projection",
            required: MIN_PROJECTION_SAMPLES,
            found: year_debits.len(),
        });
    }

    // Day counts are measured from a reference date kept inside the year
    let reference = today.clamp(config.year_start, config.year_end);
    let elapsed_days = (reference - config.year_start).num_days().max(1);
    let remaining_days = (config.year_end - reference).num_days().max(0);

    let classification = classify_recurring(&year_debits, config.strict_recurring_amounts);

    // Fixed costs still ahead: recurring groups with occurrences dated after today
    let fixed_commitments: Vec<FixedCommitment> = classification
        .recurring
        .iter()
        .filter_map(|expense| fixed_commitment(expense, &year_debits, today))
        .collect();
    let future_fixed_total: f64 = fixed_commitments.iter().map(|c| c.future_cost).sum();
    let committed: HashSet<&str> = fixed_commitments
        .iter()
        .map(|c| c.description.as_str())
        .collect();

    // Past debits of groups with nothing left to pay stay in the variable run-rate
    let variable_to_date: Vec<&Transaction> = year_debits
        .iter()
        .filter(|t| t.date <= today && !committed.contains(t.description.as_str()))
        .collect();
    let amounts: Vec<f64> = variable_to_date.iter().map(|t| t.amount).collect();

    let cutoff = match summarize(&amounts) {
        Some(stats) if stats.count >= MIN_STATISTICAL_SAMPLES => {
            Some(stats.upper_bound(config.outlier_sensitivity))
        }
        _ => None,
    };

    let (normal, outliers): (Vec<&Transaction>, Vec<&Transaction>) = variable_to_date
        .iter()
        .copied()
        .partition(|t| cutoff.map_or(true, |c| t.amount <= c));

    let mut excluded_outliers: Vec<_> = outliers.iter().map(|t| to_anomaly(t)).collect();
    sort_anomalies(&mut excluded_outliers);

    let mut normal_amounts: Vec<f64> = normal.iter().map(|t| t.amount).collect();
    normal_amounts.sort_by(f64::total_cmp);
    let variable_daily_average = normal_amounts.iter().sum::<f64>() / elapsed_days as f64;
    let projected_variable = variable_daily_average * remaining_days as f64;

    let mut spent: Vec<f64> = year_debits
        .iter()
        .filter(|t| t.date <= today)
        .map(|t| t.amount)
        .collect();
    spent.sort_by(f64::total_cmp);
    let total_spent_so_far: f64 = spent.iter().sum();

    let final_projection = total_spent_so_far + future_fixed_total + projected_variable;

    let monthly_fixed: f64 = fixed_commitments.iter().map(|c| c.mean_amount).sum();
    let monthly_cost_of_living = monthly_fixed + variable_daily_average * DAYS_PER_MONTH;

    let verdict = if final_projection > config.safety_ceiling {
        let excess = final_projection - config.safety_ceiling;
        CeilingVerdict::Over {
            excess,
            suggested_daily_cut: excess / remaining_days.max(1) as f64,
        }
    } else {
        CeilingVerdict::Within {
            margin: config.safety_ceiling - final_projection,
        }
    };

    let past_debits: Vec<Transaction> = year_debits
        .iter()
        .filter(|t| t.date <= today)
        .cloned()
        .collect();
    let anomalies = detect_anomalies(&past_debits, config.projection_anomaly_sensitivity);

    debug!(
        total_spent_so_far,
        future_fixed_total,
        projected_variable,
        excluded = excluded_outliers.len(),
        "Projection components"
    );
    info!(
        final_projection,
        ceiling = config.safety_ceiling,
        over = verdict.is_over(),
        "Annual projection complete"
    );

    Ok(AnnualProjection {
        today,
        year_start: config.year_start,
        year_end: config.year_end,
        elapsed_days,
        remaining_days,
        fixed_commitments,
        future_fixed_total,
        variable_sample_size: variable_to_date.len(),
        excluded_outliers,
        variable_daily_average,
        projected_variable,
        total_spent_so_far,
        final_projection,
        monthly_cost_of_living,
        safety_ceiling: config.safety_ceiling,
        verdict,
        anomalies,
    })
}

/// What a recurring expense still costs after `today`, if anything
fn fixed_commitment(
    expense: &RecurringExpense,
    year_debits: &[Transaction],
    today: NaiveDate,
) -> Option<FixedCommitment> {
    let mut future: Vec<f64> = year_debits
        .iter()
        .filter(|t| t.description == expense.description && t.date > today)
        .map(|t| t.amount)
        .collect();
    if future.is_empty() {
        return None;
    }
    future.sort_by(f64::total_cmp);

    Some(FixedCommitment {
        description: expense.description.clone(),
        category: expense.category.clone(),
        mean_amount: expense.mean_amount,
        last_occurrence: expense.last_occurrence,
        months_remaining: future.len() as u32,
        future_cost: future.iter().sum(),
    })
}
