//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` / `open_engine` - Analytics configuration
//! - `open_budget` - Budget limits store
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::models::parse_date;
use tally_core::{AnalyticsConfig, AnalyticsEngine, BudgetStore, Database};

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

/// Load analytics config from an explicit path, the data-dir override or the built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load analytics config")
}

pub fn open_engine(config_path: Option<&Path>) -> Result<AnalyticsEngine> {
    Ok(AnalyticsEngine::new(load_config(config_path)?))
}

pub fn open_budget(limits_path: &Path) -> BudgetStore {
    BudgetStore::new(limits_path)
}

/// Parse an optional YYYY-MM-DD argument, defaulting to the local date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => parse_date(s).context("Invalid --today date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    let seeded = db
        .seed_sample_data()
        .context("Failed to seed sample data")?;
    if seeded > 0 {
        println!("   Seeded {} sample transactions", seeded);
    } else {
        println!("   Ledger already has data, skipped sample seed");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record spending: tally add -d Mercado -c Alimentação -a 120");
    println!("  2. Check budgets: tally report budget");

    Ok(())
}
