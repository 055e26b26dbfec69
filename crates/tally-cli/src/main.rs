//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init                          Initialize database with sample data
//!   tally add -d Mercado -c Alimentação -a 450
//!   tally budget set Lazer 200          Set a category limit
//!   tally report projection             Year-end outlook

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            description,
            category,
            amount,
            date,
            kind,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                &description,
                &category,
                &amount,
                date.as_deref(),
                &kind,
            )
        }
        Commands::RecurringAdd {
            description,
            category,
            amount,
            from,
            to,
            day,
        } => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_recurring_add(
                &db,
                &config,
                &description,
                &category,
                &amount,
                (&from, &to),
                day,
            )
        }
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(TransactionsAction::List) => commands::cmd_transactions_list(&db),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, id)
                }
            }
        }
        Commands::Budget { action } => {
            let store = commands::open_budget(&cli.limits);
            match action {
                None | Some(BudgetAction::Show) => {
                    let db = commands::open_db(&cli.db)?;
                    let engine = commands::open_engine(cli.config.as_deref())?;
                    commands::cmd_budget_show(&db, &engine, &store)
                }
                Some(BudgetAction::Set { category, limit }) => {
                    commands::cmd_budget_set(&store, &category, &limit)
                }
                Some(BudgetAction::Remove { category }) => {
                    commands::cmd_budget_remove(&store, &category)
                }
            }
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&cli.db)?;
            let engine = commands::open_engine(cli.config.as_deref())?;
            match report_type {
                ReportType::Budget { month } => {
                    let limits = commands::open_budget(&cli.limits).load_limits()?;
                    commands::cmd_report_budget(&db, &engine, &limits, month.as_deref())
                }
                ReportType::Anomalies { month } => {
                    commands::cmd_report_anomalies(&db, &engine, month.as_deref())
                }
                ReportType::Recurring => commands::cmd_report_recurring(&db, &engine),
                ReportType::Projection { today } => {
                    commands::cmd_report_projection(&db, &engine, today.as_deref())
                }
                ReportType::Compare { previous, current } => {
                    commands::cmd_report_compare(&db, &engine, &previous, &current)
                }
                ReportType::All { out, today } => {
                    let limits = commands::open_budget(&cli.limits).load_limits()?;
                    commands::cmd_report_all(
                        &db,
                        &engine,
                        &limits,
                        out.as_deref(),
                        today.as_deref(),
                    )
                }
            }
        }
        Commands::Export { format, output } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, &format, output.as_deref())
        }
    }
}
