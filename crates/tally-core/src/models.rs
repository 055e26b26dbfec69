//! Domain models for Tally

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category name → spending ceiling
///
/// Ordered so every report built from it lists categories the same way.
pub type BudgetLimits = BTreeMap<String, f64>;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money going out (expense)
    #[default]
    Debit,
    /// Money coming in (income)
    Credit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    pub fn is_debit(&self) -> bool {
        matches!(self, Self::Debit)
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "débito" | "debito" | "d" | "expense" => Ok(Self::Debit),
            "credit" | "crédito" | "credito" | "c" | "income" => Ok(Self::Credit),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    /// Always non-negative; direction comes from `kind`
    pub amount: f64,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.kind.is_debit()
    }
}

/// A transaction to be inserted (before it has an ID)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            amount,
            kind,
        }
    }

    /// Shorthand for an expense
    pub fn debit(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self::new(date, description, category, amount, TransactionKind::Debit)
    }

    /// Reject values the ledger must never store
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::InvalidInput("Description cannot be empty".into()));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidInput("Category cannot be empty".into()));
        }
        validate_amount(self.amount)?;
        Ok(())
    }
}

/// A fixed monthly expense to be registered across a range of months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub description: String,
    pub category: String,
    pub amount: f64,
    /// First month (1-12), inclusive
    pub from_month: u32,
    /// Last month (1-12), inclusive
    pub to_month: u32,
    /// Day of month the charge lands on
    pub day: u32,
}

impl Recurrence {
    /// Day of month used when none is given
    pub const DEFAULT_DAY: u32 = 5;

    pub fn monthly(
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        from_month: u32,
        to_month: u32,
    ) -> Self {
        Self {
            description: description.into(),
            category: category.into(),
            amount,
            from_month,
            to_month,
            day: Self::DEFAULT_DAY,
        }
    }

    pub fn on_day(mut self, day: u32) -> Self {
        self.day = day;
        self
    }
}

/// Amounts are finite and non-negative
pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(Error::InvalidInput(format!("Amount is not a number: {}", amount)));
    }
    if amount < 0.0 {
        return Err(Error::InvalidInput(format!(
            "Amount cannot be negative: {:.2}",
            amount
        )));
    }
    Ok(amount)
}

/// Parse a user-supplied amount ("15.50" or "15,50")
pub fn parse_amount(s: &str) -> Result<f64> {
    let normalized = s.trim().replace(',', ".");
    let amount: f64 = normalized
        .parse()
        .map_err(|_| Error::InvalidInput(format!("Amount is not numeric: {:?}", s)))?;
    validate_amount(amount)
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput(format!("Invalid date {:?} (use YYYY-MM-DD)", s)))
}

/// Parse a month number, accepting "3" as well as "03"
pub fn parse_month(s: &str) -> Result<u32> {
    let month: u32 = s
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("Month is not numeric: {:?}", s)))?;
    validate_month(month)
}

/// Months are 1..=12
pub fn validate_month(month: u32) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(Error::InvalidInput(format!(
            "Month must be between 01 and 12, got {}",
            month
        )))
    }
}
