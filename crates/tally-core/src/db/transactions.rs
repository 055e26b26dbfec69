//! Transaction operations

use chrono::{Datelike, NaiveDate};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info, warn};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{validate_month, NewTransaction, Recurrence, Transaction, TransactionKind};

const SELECT_COLUMNS: &str = "SELECT id, date, description, category, amount, kind, created_at FROM transactions";

impl Database {
    /// Append a transaction to the ledger, returning its new ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        tx.validate()?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (date, description, category, amount, kind)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                tx.date.to_string(),
                tx.description.trim(),
                tx.category.trim(),
                tx.amount,
                tx.kind.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(id, description = %tx.description, amount = tx.amount, "Transaction recorded");
        Ok(id)
    }

    /// Delete a transaction by ID. Returns false if no such transaction exists.
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;

        if removed > 0 {
            info!(id, "Transaction removed");
            Ok(true)
        } else {
            warn!(id, "Transaction not found");
            Ok(false)
        }
    }

    /// Snapshot of every transaction, ordered by date then ID
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY date, id", SELECT_COLUMNS))?;

        let transactions = stmt
            .query_map([], |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = transactions.len(), "Loaded ledger snapshot");
        Ok(transactions)
    }

    /// Transactions dated within one calendar month
    pub fn list_transactions_in_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        validate_month(month)?;
        let (from, to) = month_bounds(year, month)?;

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE date >= ? AND date <= ? ORDER BY date, id",
            SELECT_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(
                params![from.to_string(), to.to_string()],
                |row| Self::row_to_transaction(row),
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?", SELECT_COLUMNS))?;

        let transaction = stmt
            .query_row(params![id], |row| Self::row_to_transaction(row))
            .optional()?;

        Ok(transaction)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Seed the example ledger (rent, salary, groceries) when it is empty
    ///
    /// Returns the number of rows inserted (0 when the ledger already had data).
    pub fn seed_sample_data(&self) -> Result<usize> {
        if self.count_transactions()? > 0 {
            return Ok(0);
        }

        let jan = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap_or_default();
        let seed = [
            NewTransaction::debit(jan(1), "Aluguel", "Moradia", 1200.0),
            NewTransaction::new(jan(5), "Salário", "Renda", 5000.0, TransactionKind::Credit),
            NewTransaction::debit(jan(10), "Mercado", "Alimentação", 450.0),
        ];

        for tx in &seed {
            self.insert_transaction(tx)?;
        }

        info!(count = seed.len(), "Ledger seeded with sample data");
        Ok(seed.len())
    }

    /// Register a monthly recurring expense as one debit per month
    ///
    /// Inserts a debit on `day` of every month in `from_month..=to_month` of
    /// `year`. Days past the end of a short month land on its last day.
    /// All rows are written in one SQLite transaction.
    pub fn add_recurrence(&self, recurrence: &Recurrence, year: i32) -> Result<Vec<i64>> {
        let Recurrence {
            description,
            category,
            amount,
            from_month,
            to_month,
            day,
        } = recurrence;
        let (amount, from_month, to_month, day) = (*amount, *from_month, *to_month, *day);

        validate_month(from_month)?;
        validate_month(to_month)?;
        if from_month > to_month {
            return Err(Error::InvalidInput(format!(
                "Start month {:02} is after end month {:02}",
                from_month, to_month
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::InvalidInput(format!(
                "Day must be between 1 and 31, got {}",
                day
            )));
        }

        let rows = (from_month..=to_month)
            .map(|month| -> Result<NewTransaction> {
                let (_, last) = month_bounds(year, month)?;
                let date = NaiveDate::from_ymd_opt(year, month, day.min(last.day()))
                    .ok_or_else(|| Error::InvalidInput(format!("Invalid date {}-{:02}-{:02}", year, month, day)))?;
                let tx = NewTransaction::debit(date, description, category, amount);
                tx.validate()?;
                Ok(tx)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.conn()?;
        let sql_tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(rows.len());
        for tx in &rows {
            sql_tx.execute(
                r#"
                INSERT INTO transactions (date, description, category, amount, kind)
                VALUES (?, ?, ?, ?, ?)
                "#,
                params![
                    tx.date.to_string(),
                    tx.description.trim(),
                    tx.category.trim(),
                    tx.amount,
                    tx.kind.as_str(),
                ],
            )?;
            ids.push(sql_tx.last_insert_rowid());
        }
        sql_tx.commit()?;

        info!(
            description = %description,
            from_month,
            to_month,
            count = ids.len(),
            "Recurring expense registered"
        );
        Ok(ids)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(1)?;
        let kind_str: String = row.get(5)?;
        let created_at_str: String = row.get(6)?;

        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let kind = kind_str.parse::<TransactionKind>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                Box::new(Error::InvalidData(e)),
            )
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            date,
            description: row.get(2)?,
            category: row.get(3)?,
            amount: row.get(4)?,
            kind,
            created_at: parse_datetime(&created_at_str),
        })
    }
}

/// First and last day of a calendar month
pub(crate) fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidInput(format!("Invalid month {}-{:02}", year, month)))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| Error::InvalidInput(format!("Invalid month {}-{:02}", year, month)))?;
    let last = next
        .pred_opt()
        .ok_or_else(|| Error::InvalidInput(format!("Invalid month {}-{:02}", year, month)))?;
    Ok((first, last))
}
