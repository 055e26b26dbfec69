//! Category aggregation and budget check

use std::cmp::Ordering;

use crate::models::{BudgetLimits, Transaction};

use super::types::{BudgetLine, BudgetReport, BudgetStatus, CategoryAggregate, CategoryShare};

/// Sum debit amounts per category
pub fn category_totals(transactions: &[Transaction]) -> CategoryAggregate {
    let mut totals = CategoryAggregate::new();
    for tx in transactions.iter().filter(|t| t.is_debit()) {
        *totals.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
    }
    totals
}

/// Compare spending against every budgeted category and compute each
/// category's share of total spending
pub fn budget_check(
    transactions: &[Transaction],
    limits: &BudgetLimits,
    warning_ratio: f64,
) -> BudgetReport {
    let totals = category_totals(transactions);
    let total_debit: f64 = totals.values().sum();

    let lines = limits
        .iter()
        .map(|(category, &limit)| {
            let spent = totals.get(category).copied().unwrap_or(0.0);
            let percentage = if limit > 0.0 {
                Some(spent / limit * 100.0)
            } else {
                None
            };
            BudgetLine {
                category: category.clone(),
                limit,
                spent,
                percentage,
                status: BudgetStatus::classify(spent, limit, warning_ratio),
            }
        })
        .collect();

    BudgetReport {
        month: None,
        total_debit,
        lines,
        impact: impact_breakdown(&totals, total_debit),
    }
}

/// Share of the grand total per category, largest first
fn impact_breakdown(totals: &CategoryAggregate, total_debit: f64) -> Vec<CategoryShare> {
    if total_debit <= 0.0 {
        return vec![];
    }

    let mut shares: Vec<CategoryShare> = totals
        .iter()
        .filter(|(_, &amount)| amount > 0.0)
        .map(|(category, &amount)| CategoryShare {
            category: category.clone(),
            amount,
            percentage: amount / total_debit * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    shares
}
