//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::PathBuf;

use chrono::NaiveDate;
use tally_core::{AnalyticsConfig, AnalyticsEngine, BudgetStore, Database, TransactionKind};
use tempfile::TempDir;

use crate::commands::{self, month_label, truncate};

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_sample_data().unwrap();
    db
}

fn engine() -> AnalyticsEngine {
    AnalyticsEngine::new(AnalyticsConfig::default())
}

fn limits_path(dir: &TempDir) -> PathBuf {
    dir.path().join("limits.json")
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Mercado", 10), "Mercado");
    assert_eq!(truncate("Supermercado Central", 10), "Superme...");
    // Counts characters, not bytes
    assert_eq!(truncate("Alimentação", 11), "Alimentação");
    assert_eq!(truncate("Alimentação e bebidas", 8), "Alime...");
}

#[test]
fn test_month_label() {
    assert_eq!(month_label(2026, 3), "2026-03");
    assert_eq!(month_label(2026, 12), "2026-12");
}

#[test]
fn test_resolve_today() {
    assert_eq!(
        commands::resolve_today(Some("2026-10-17")).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    );
    assert!(commands::resolve_today(Some("17/10/2026")).is_err());
    assert!(commands::resolve_today(None).is_ok());
}

// ========== Init Command Tests ==========

#[test]
fn test_cmd_init_seeds_once() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("tally.db");

    assert!(commands::cmd_init(&db_path).is_ok());
    assert!(commands::cmd_init(&db_path).is_ok());

    let db = commands::open_db(&db_path).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 3);
}

#[test]
fn test_load_config_missing_explicit_path() {
    let dir = TempDir::new().unwrap();
    let result = commands::load_config(Some(&dir.path().join("nope.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_config_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analytics.toml");
    std::fs::write(&path, "[year]\nstart = \"2026-06-01\"\nend = \"2026-01-01\"\n").unwrap();
    assert!(commands::load_config(Some(&path)).is_err());

    std::fs::write(&path, "[projection]\nsafety_ceiling = 25000.0\n").unwrap();
    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.safety_ceiling, 25_000.0);
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = Database::in_memory().unwrap();
    let result = commands::cmd_add(
        &db,
        "Padaria",
        "Alimentação",
        "12,50",
        Some("2026-02-03"),
        "debit",
    );
    assert!(result.is_ok());

    let txs = db.list_transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, 12.5);
    assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
    assert_eq!(txs[0].kind, TransactionKind::Debit);
}

#[test]
fn test_cmd_add_credit_defaults_date() {
    let db = Database::in_memory().unwrap();
    assert!(commands::cmd_add(&db, "Freela", "Renda", "800", None, "credit").is_ok());

    let txs = db.list_transactions().unwrap();
    assert_eq!(txs[0].kind, TransactionKind::Credit);
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let db = Database::in_memory().unwrap();
    assert!(commands::cmd_add(&db, "Padaria", "Alimentação", "-5", None, "debit").is_err());
    assert!(commands::cmd_add(&db, "Padaria", "Alimentação", "abc", None, "debit").is_err());
    assert!(
        commands::cmd_add(&db, "Padaria", "Alimentação", "5", Some("2026-13-01"), "debit")
            .is_err()
    );
    assert!(commands::cmd_add(&db, "Padaria", "Alimentação", "5", None, "transfer").is_err());
    assert!(commands::cmd_add(&db, "  ", "Alimentação", "5", None, "debit").is_err());
    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_cmd_recurring_add() {
    let db = Database::in_memory().unwrap();
    let config = AnalyticsConfig::default();
    let result =
        commands::cmd_recurring_add(&db, &config, "Academia", "Saúde", "99.9", ("3", "8"), 31);
    assert!(result.is_ok());

    let txs = db.list_transactions().unwrap();
    assert_eq!(txs.len(), 6);
    // April has 30 days
    assert_eq!(txs[1].date, NaiveDate::from_ymd_opt(2026, 4, 30).unwrap());
}

#[test]
fn test_cmd_recurring_add_invalid_range() {
    let db = Database::in_memory().unwrap();
    let config = AnalyticsConfig::default();
    assert!(
        commands::cmd_recurring_add(&db, &config, "Academia", "Saúde", "99", ("8", "3"), 5)
            .is_err()
    );
    assert!(
        commands::cmd_recurring_add(&db, &config, "Academia", "Saúde", "99", ("0", "3"), 5)
            .is_err()
    );
    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_cmd_transactions_list() {
    let db = setup_test_db();
    assert!(commands::cmd_transactions_list(&db).is_ok());

    let empty = Database::in_memory().unwrap();
    assert!(commands::cmd_transactions_list(&empty).is_ok());
}

#[test]
fn test_cmd_transactions_delete() {
    let db = setup_test_db();
    let id = db.list_transactions().unwrap()[0].id;

    assert!(commands::cmd_transactions_delete(&db, id).is_ok());
    assert!(db.get_transaction(id).unwrap().is_none());

    // Deleting again is an error
    assert!(commands::cmd_transactions_delete(&db, id).is_err());
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget_show_defaults() {
    let db = setup_test_db();
    let dir = TempDir::new().unwrap();
    let store = commands::open_budget(&limits_path(&dir));

    assert!(commands::cmd_budget_show(&db, &engine(), &store).is_ok());
    // Showing never writes the file
    assert!(!limits_path(&dir).exists());
}

#[test]
fn test_cmd_budget_set_and_remove() {
    let dir = TempDir::new().unwrap();
    let store = commands::open_budget(&limits_path(&dir));

    assert!(commands::cmd_budget_set(&store, "Lazer", "200").is_ok());
    let limits = BudgetStore::new(limits_path(&dir)).load_limits().unwrap();
    assert_eq!(limits["Lazer"], 200.0);
    assert_eq!(limits["Moradia"], 1500.0);

    assert!(commands::cmd_budget_remove(&store, "Lazer").is_ok());
    assert!(commands::cmd_budget_remove(&store, "Lazer").is_err());
}

#[test]
fn test_cmd_budget_set_rejects_negative() {
    let dir = TempDir::new().unwrap();
    let store = commands::open_budget(&limits_path(&dir));
    assert!(commands::cmd_budget_set(&store, "Lazer", "-1").is_err());
    assert!(!limits_path(&dir).exists());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_report_budget() {
    let db = setup_test_db();
    let limits = tally_core::default_limits();

    assert!(commands::cmd_report_budget(&db, &engine(), &limits, None).is_ok());
    assert!(commands::cmd_report_budget(&db, &engine(), &limits, Some("1")).is_ok());
    assert!(commands::cmd_report_budget(&db, &engine(), &limits, Some("13")).is_err());
}

#[test]
fn test_cmd_report_anomalies_insufficient_data_is_ok() {
    let db = setup_test_db();
    assert!(commands::cmd_report_anomalies(&db, &engine(), None).is_ok());
    assert!(commands::cmd_report_anomalies(&db, &engine(), Some("02")).is_ok());
}

#[test]
fn test_cmd_report_recurring() {
    let db = setup_test_db();
    assert!(commands::cmd_report_recurring(&db, &engine()).is_ok());
}

#[test]
fn test_cmd_report_projection() {
    let db = setup_test_db();
    assert!(commands::cmd_report_projection(&db, &engine(), Some("2026-10-17")).is_ok());
    assert!(commands::cmd_report_projection(&db, &engine(), Some("not-a-date")).is_err());

    // Too few debits is informational, not a failure
    let empty = Database::in_memory().unwrap();
    assert!(commands::cmd_report_projection(&empty, &engine(), Some("2026-10-17")).is_ok());
}

#[test]
fn test_cmd_report_compare() {
    let db = setup_test_db();
    commands::cmd_add(&db, "Mercado", "Alimentação", "300", Some("2026-02-10"), "debit")
        .unwrap();

    assert!(commands::cmd_report_compare(&db, &engine(), "1", "2").is_ok());
    // Empty previous month is informational
    assert!(commands::cmd_report_compare(&db, &engine(), "3", "2").is_ok());
    assert!(commands::cmd_report_compare(&db, &engine(), "0", "2").is_err());
}

#[test]
fn test_cmd_report_all_writes_artifacts() {
    let db = setup_test_db();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let result = commands::cmd_report_all(
        &db,
        &engine(),
        &tally_core::default_limits(),
        Some(&out),
        Some("2026-10-17"),
    );
    assert!(result.is_ok());
    assert!(out.join("transactions.csv").exists());
    assert!(out.join("budget.csv").exists());
    assert!(out.join("report.json").exists());
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export_csv_to_file() {
    let db = setup_test_db();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.csv");

    assert!(commands::cmd_export(&db, "csv", Some(&path)).is_ok());
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("id,date,description,category,amount,kind"));
    assert!(content.contains("Mercado"));
}

#[test]
fn test_cmd_export_json_to_file() {
    let db = setup_test_db();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.json");

    assert!(commands::cmd_export(&db, "json", Some(&path)).is_ok());
    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn test_cmd_export_unknown_format() {
    let db = setup_test_db();
    assert!(commands::cmd_export(&db, "xlsx", None).is_err());
}
