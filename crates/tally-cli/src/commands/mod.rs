//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Budget limit commands (show, set, remove)
//! - `core` - Init and shared utilities (open_db, load_config, open_engine)
//! - `export` - Ledger export (CSV, JSON)
//! - `reports` - Analysis reports (budget, anomalies, recurring, projection, compare, all)
//! - `transactions` - Transaction commands (add, recurring-add, list, delete)

pub mod budget;
pub mod core;
pub mod export;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use budget::*;
pub use core::*;
pub use export::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a month argument the way reports label it ("2026-03")
pub fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}
