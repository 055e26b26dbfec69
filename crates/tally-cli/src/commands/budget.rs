//! Budget limit command implementations

use anyhow::{Context, Result};
use tally_core::models::parse_amount;
use tally_core::{AnalyticsEngine, BudgetStatus, BudgetStore, Database};

use super::truncate;

pub fn cmd_budget_show(
    db: &Database,
    engine: &AnalyticsEngine,
    store: &BudgetStore,
) -> Result<()> {
    let limits = store.load_limits()?;

    println!();
    println!("🎯 Budget Limits ({})", store.path().display());
    println!("   ─────────────────────────────────────────────────────────────");

    if limits.is_empty() {
        println!("   No limits set. Add one with:");
        println!("     tally budget set Alimentação 500");
        return Ok(());
    }

    let transactions = db.list_transactions()?;
    let report = engine.budget_check(&transactions, &limits, None)?;

    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>7}",
        "Category", "Limit", "Spent", "Used"
    );
    println!("   ─────────────────────┼────────────┼────────────┼────────");
    for line in &report.lines {
        let used = line
            .percentage
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "-".to_string());
        let marker = match line.status {
            BudgetStatus::Ok => "",
            BudgetStatus::Warning => " ⚠️",
            BudgetStatus::Critical => " 🔴",
        };
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>7}{}",
            truncate(&line.category, 20),
            line.limit,
            line.spent,
            used,
            marker
        );
    }

    Ok(())
}

pub fn cmd_budget_set(store: &BudgetStore, category: &str, limit: &str) -> Result<()> {
    let limit = parse_amount(limit).context("Invalid limit")?;
    let limits = store.set_limit(category, limit)?;

    println!(
        "✅ Limit for {} set to {:.2} ({} categories budgeted)",
        category.trim(),
        limit,
        limits.len()
    );
    Ok(())
}

pub fn cmd_budget_remove(store: &BudgetStore, category: &str) -> Result<()> {
    if store.remove_limit(category)? {
        println!("🗑️  Removed limit for {}", category.trim());
        Ok(())
    } else {
        anyhow::bail!("No limit set for {}", category.trim())
    }
}
