//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track spending, budgets and the year-end outlook
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with spending analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Budget limits file (JSON object of category → limit)
    #[arg(long, default_value = "limits.json", global = true)]
    pub limits: PathBuf,

    /// Analytics config file (defaults to the data-dir override or built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed sample transactions
    Init,

    /// Record a transaction
    Add {
        /// What the money went to (or came from)
        #[arg(short, long)]
        description: String,

        /// Spending category (e.g. Alimentação)
        #[arg(short, long)]
        category: String,

        /// Non-negative amount; "12,50" and "12.50" both work
        #[arg(short, long)]
        amount: String,

        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// debit or credit
        #[arg(short, long, default_value = "debit")]
        kind: String,
    },

    /// Register a fixed monthly expense for a range of months
    RecurringAdd {
        #[arg(short, long)]
        description: String,

        #[arg(short, long)]
        category: String,

        /// Amount charged every month
        #[arg(short, long)]
        amount: String,

        /// First month (1-12)
        #[arg(long)]
        from: String,

        /// Last month (1-12)
        #[arg(long)]
        to: String,

        /// Day of month the charge lands on
        #[arg(long, default_value = "5")]
        day: u32,
    },

    /// Manage transactions (list, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage budget limits (show, set, remove)
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Run an analysis report
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export all transactions
    Export {
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List every transaction
    List,

    /// Delete a transaction
    Delete {
        /// Transaction ID to delete
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Show limits and how much of each is used
    Show,

    /// Set the limit for a category
    Set {
        category: String,
        /// New limit
        limit: String,
    },

    /// Remove the limit for a category
    Remove { category: String },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending against budget limits
    Budget {
        /// Restrict to one month of the tracked year (1-12)
        #[arg(long)]
        month: Option<String>,
    },

    /// Unusually large expenses
    Anomalies {
        /// Restrict to one month of the tracked year (1-12)
        #[arg(long)]
        month: Option<String>,
    },

    /// Fixed expenses that repeat under the same description
    Recurring,

    /// Year-end spending projection against the safety ceiling
    Projection {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },

    /// Compare spending between two months
    Compare {
        /// Earlier month (1-12)
        #[arg(long)]
        previous: String,

        /// Later month (1-12)
        #[arg(long)]
        current: String,
    },

    /// Every report, plus CSV/JSON artifacts
    All {
        /// Directory for transactions.csv, budget.csv and report.json
        #[arg(long)]
        out: Option<PathBuf>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
}
