//! Report command implementations
//!
//! Analyses that lack data (too few debits, an empty comparison month) print
//! an informational line instead of failing the command.

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::analytics::{
    AnnualProjection, AnomalyReport, BudgetReport, CeilingVerdict, MonthComparison,
    RecurringExpense,
};
use tally_core::export::write_report_bundle;
use tally_core::models::parse_month;
use tally_core::{AnalyticsEngine, BudgetLimits, BudgetStatus, ComparisonOutcome, Database};

use super::{month_label, resolve_today, truncate};

fn parse_month_arg(month: Option<&str>) -> Result<Option<u32>> {
    month
        .map(parse_month)
        .transpose()
        .context("Invalid --month (use 1-12)")
}

/// Print an insufficient-data error as an info line, propagate anything else
fn info_or_err(err: tally_core::Error) -> Result<()> {
    if err.is_insufficient_data() {
        println!("   ℹ️  {}", err);
        Ok(())
    } else {
        Err(err.into())
    }
}

pub fn cmd_report_budget(
    db: &Database,
    engine: &AnalyticsEngine,
    limits: &BudgetLimits,
    month: Option<&str>,
) -> Result<()> {
    let month = parse_month_arg(month)?;
    let transactions = db.list_transactions()?;
    let report = engine.budget_check(&transactions, limits, month)?;

    print_budget_report(&report, engine.config().year());
    Ok(())
}

pub fn cmd_report_anomalies(
    db: &Database,
    engine: &AnalyticsEngine,
    month: Option<&str>,
) -> Result<()> {
    let month = parse_month_arg(month)?;
    let transactions = engine.filter_month(&db.list_transactions()?, month)?;
    let report =
        engine.detect_anomalies(&transactions, engine.config().budget_anomaly_sensitivity);

    print_anomaly_report(&report);
    Ok(())
}

pub fn cmd_report_recurring(db: &Database, engine: &AnalyticsEngine) -> Result<()> {
    let transactions = db.list_transactions()?;
    let classification = engine.classify_recurring(&transactions);

    print_recurring(&classification.recurring);
    println!(
        "   {} variable expense(s) not recurring",
        classification.variable.len()
    );
    Ok(())
}

pub fn cmd_report_projection(
    db: &Database,
    engine: &AnalyticsEngine,
    today: Option<&str>,
) -> Result<()> {
    let today = resolve_today(today)?;
    let transactions = db.list_transactions()?;

    println!();
    println!("🔮 Annual Projection");
    println!("   ─────────────────────────────────────────────────────────────");

    match engine.project_annual(&transactions, today) {
        Ok(projection) => {
            print_projection(&projection);
            Ok(())
        }
        Err(e) => info_or_err(e),
    }
}

pub fn cmd_report_compare(
    db: &Database,
    engine: &AnalyticsEngine,
    previous: &str,
    current: &str,
) -> Result<()> {
    let previous = parse_month(previous).context("Invalid --previous month (use 1-12)")?;
    let current = parse_month(current).context("Invalid --current month (use 1-12)")?;
    let transactions = db.list_transactions()?;

    println!();
    println!("📈 Month Comparison");
    println!("   ─────────────────────────────────────────────────────────────");

    match engine.compare_months(&transactions, previous, current) {
        Ok(comparison) => {
            print_comparison(&comparison);
            Ok(())
        }
        Err(e) => info_or_err(e),
    }
}

pub fn cmd_report_all(
    db: &Database,
    engine: &AnalyticsEngine,
    limits: &BudgetLimits,
    out: Option<&Path>,
    today: Option<&str>,
) -> Result<()> {
    let today = resolve_today(today)?;
    let transactions = db.list_transactions()?;
    let report = engine.full_report(&transactions, limits, today)?;

    print_budget_report(&report.alerts.budget, engine.config().year());
    print_anomaly_report(&report.alerts.anomalies);
    print_recurring(&report.recurring);

    println!();
    println!("🔮 Annual Projection");
    println!("   ─────────────────────────────────────────────────────────────");
    match (&report.projection, &report.projection_skipped) {
        (Some(projection), _) => print_projection(projection),
        (None, Some(reason)) => println!("   ℹ️  {}", reason),
        (None, None) => println!("   ℹ️  Projection not available"),
    }

    if let Some(dir) = out {
        let bundle = write_report_bundle(dir, &transactions, &report)
            .with_context(|| format!("Failed to write reports to {}", dir.display()))?;
        println!();
        println!("📁 Artifacts");
        for path in bundle.paths() {
            println!("   {}", path.display());
        }
    }

    Ok(())
}

fn print_budget_report(report: &BudgetReport, year: i32) {
    println!();
    match report.month {
        Some(month) => println!("💰 Budget Check ({})", month_label(year, month)),
        None => println!("💰 Budget Check (all transactions)"),
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if report.lines.is_empty() {
        println!("   No budget limits set.");
    } else {
        println!(
            "   {:20} │ {:>10} │ {:>10} │ {:>7} │ {}",
            "Category", "Spent", "Limit", "Used", "Status"
        );
        println!("   ─────────────────────┼────────────┼────────────┼─────────┼──────────");
        for line in &report.lines {
            let used = line
                .percentage
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "-".to_string());
            let status = match line.status {
                BudgetStatus::Ok => format!("\x1b[32m{}\x1b[0m", line.status),
                BudgetStatus::Warning => format!("\x1b[33m{}\x1b[0m", line.status),
                BudgetStatus::Critical => format!("\x1b[31m{}\x1b[0m", line.status),
            };
            println!(
                "   {:20} │ {:>10.2} │ {:>10.2} │ {:>7} │ {}",
                truncate(&line.category, 20),
                line.spent,
                line.limit,
                used,
                status
            );
        }
    }

    if report.impact.is_empty() {
        return;
    }

    println!();
    println!("   Total spent: {:.2}", report.total_debit);
    for share in &report.impact {
        println!(
            "   {:20} │ {:>10.2} │ {:>5.1}%",
            truncate(&share.category, 20),
            share.amount,
            share.percentage
        );
    }
}

fn print_anomaly_report(report: &AnomalyReport) {
    println!();
    println!("🚨 Unusual Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    let Some(threshold) = &report.threshold else {
        println!(
            "   ℹ️  Insufficient data: need at least 3 debit transactions, found {}",
            report.sample_size
        );
        return;
    };

    println!(
        "   Mean {:.2} │ Std dev {:.2} │ Threshold {:.2} (k = {})",
        threshold.mean, threshold.std_dev, threshold.threshold, threshold.sensitivity
    );

    if report.anomalies.is_empty() {
        println!("   No unusual expenses.");
        return;
    }

    for anomaly in &report.anomalies {
        println!(
            "   [{}] {} │ {:>10.2} │ {:15} │ {}",
            anomaly.transaction_id,
            anomaly.date,
            anomaly.amount,
            truncate(&anomaly.category, 15),
            truncate(&anomaly.description, 30)
        );
    }
}

fn print_recurring(recurring: &[RecurringExpense]) {
    println!();
    println!("🔁 Recurring Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    if recurring.is_empty() {
        println!("   No recurring expenses found.");
        return;
    }

    for expense in recurring {
        println!(
            "   {:25} │ {:>10.2}/mo │ {:>2}x │ last {}",
            truncate(&expense.description, 25),
            expense.mean_amount,
            expense.occurrence_count,
            expense.last_occurrence
        );
    }
}

fn print_projection(p: &AnnualProjection) {
    println!(
        "   As of {} ({} days elapsed, {} remaining)",
        p.today, p.elapsed_days, p.remaining_days
    );
    println!();
    println!("   Spent so far:           {:>12.2}", p.total_spent_so_far);
    println!("   Fixed still to come:    {:>12.2}", p.future_fixed_total);
    for commitment in &p.fixed_commitments {
        println!(
            "     {:22} {:>2} left │ {:>10.2}",
            truncate(&commitment.description, 22),
            commitment.months_remaining,
            commitment.future_cost
        );
    }
    println!(
        "   Variable projected:     {:>12.2} ({:.2}/day)",
        p.projected_variable, p.variable_daily_average
    );
    if !p.excluded_outliers.is_empty() {
        println!(
            "     {} outlier(s) left out of the daily average",
            p.excluded_outliers.len()
        );
    }
    println!("   ─────────────────────────────────────");
    println!("   Year-end projection:    {:>12.2}", p.final_projection);
    println!("   Safety ceiling:         {:>12.2}", p.safety_ceiling);
    println!("   Monthly cost of living: {:>12.2}", p.monthly_cost_of_living);
    println!();

    match p.verdict {
        CeilingVerdict::Within { margin } => {
            println!("   ✅ Within the ceiling, {:.2} to spare", margin);
        }
        CeilingVerdict::Over {
            excess,
            suggested_daily_cut,
        } => {
            println!("   🔴 Over the ceiling by {:.2}", excess);
            println!("      Cut {:.2} per day to stay within it", suggested_daily_cut);
        }
    }

    if !p.anomalies.anomalies.is_empty() {
        println!();
        println!("   Unusual expenses this year:");
        for anomaly in &p.anomalies.anomalies {
            println!(
                "     {} │ {:>10.2} │ {}",
                anomaly.date,
                anomaly.amount,
                truncate(&anomaly.description, 30)
            );
        }
    }
}

fn print_comparison(c: &MonthComparison) {
    println!(
        "   {}: {:>10.2}",
        month_label(c.year, c.previous_month),
        c.previous_total
    );
    println!(
        "   {}: {:>10.2}",
        month_label(c.year, c.current_month),
        c.current_total
    );
    println!();

    match c.outcome {
        ComparisonOutcome::Savings => println!(
            "   ✅ Saved {:.2} ({:.1}% less)",
            c.magnitude, c.percentage
        ),
        ComparisonOutcome::Increase => println!(
            "   🔺 Spent {:.2} more ({:.1}% more)",
            c.magnitude,
            c.percentage.abs()
        ),
        ComparisonOutcome::Unchanged => println!("   No change in spending"),
    }
}
