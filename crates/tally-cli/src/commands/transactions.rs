//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::Local;
use tally_core::models::{parse_amount, parse_date, parse_month, NewTransaction, Recurrence};
use tally_core::{AnalyticsConfig, Database, TransactionKind};

use super::truncate;

pub fn cmd_add(
    db: &Database,
    description: &str,
    category: &str,
    amount: &str,
    date: Option<&str>,
    kind: &str,
) -> Result<()> {
    let amount = parse_amount(amount).context("Invalid --amount")?;
    let date = match date {
        Some(s) => parse_date(s).context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Local::now().date_naive(),
    };
    let kind: TransactionKind = kind.parse().map_err(anyhow::Error::msg)?;

    let tx = NewTransaction::new(date, description, category, amount, kind);
    let id = db.insert_transaction(&tx)?;

    println!(
        "✅ Recorded [{}] {} │ {} │ {:.2} ({})",
        id,
        tx.date,
        tx.description.trim(),
        tx.amount,
        tx.kind
    );
    Ok(())
}

pub fn cmd_recurring_add(
    db: &Database,
    config: &AnalyticsConfig,
    description: &str,
    category: &str,
    amount: &str,
    months: (&str, &str),
    day: u32,
) -> Result<()> {
    let amount = parse_amount(amount).context("Invalid --amount")?;
    let from_month = parse_month(months.0).context("Invalid --from month")?;
    let to_month = parse_month(months.1).context("Invalid --to month")?;

    let recurrence =
        Recurrence::monthly(description, category, amount, from_month, to_month).on_day(day);
    let ids = db.add_recurrence(&recurrence, config.year())?;

    println!(
        "✅ Registered {} monthly payments of {:.2} for {} ({:02}-{:02}/{})",
        ids.len(),
        amount,
        description.trim(),
        from_month,
        to_month,
        config.year()
    );
    Ok(())
}

pub fn cmd_transactions_list(db: &Database) -> Result<()> {
    let transactions = db.list_transactions()?;

    if transactions.is_empty() {
        println!("No transactions found. Record some with:");
        println!("  tally add -d Mercado -c Alimentação -a 120");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = if tx.is_debit() {
            format!("\x1b[31m-{:.2}\x1b[0m", tx.amount) // Red for expenses
        } else {
            format!("\x1b[32m+{:.2}\x1b[0m", tx.amount) // Green for income
        };

        println!(
            "   [{}] {} │ {:>10} │ {:15} │ {}",
            tx.id,
            tx.date,
            amount_str,
            truncate(&tx.category, 15),
            truncate(&tx.description, 30)
        );
    }

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    db.delete_transaction(id)?;

    println!(
        "🗑️  Deleted transaction {}: {} ({:.2})",
        id,
        truncate(&tx.description, 40),
        tx.amount
    );
    Ok(())
}
