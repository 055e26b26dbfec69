//! Month-over-month spending comparison

use chrono::Datelike;

use crate::error::{Error, Result};
use crate::models::{validate_month, Transaction};

use super::types::{ComparisonOutcome, MonthComparison};

/// Compare debit totals of two months of `year`
///
/// Fails with [`Error::DivisionGuard`] when the previous month has no
/// spending, since the change cannot be expressed as a percentage.
pub fn compare_months(
    transactions: &[Transaction],
    year: i32,
    previous_month: u32,
    current_month: u32,
) -> Result<MonthComparison> {
    validate_month(previous_month)?;
    validate_month(current_month)?;

    let previous_total = month_total(transactions, year, previous_month);
    let current_total = month_total(transactions, year, current_month);

    if previous_total <= 0.0 {
        return Err(Error::DivisionGuard(format!(
            "no spending recorded in {:04}-{:02} to compare against",
            year, previous_month
        )));
    }

    let difference = previous_total - current_total;
    let outcome = if difference > 0.0 {
        ComparisonOutcome::Savings
    } else if difference < 0.0 {
        ComparisonOutcome::Increase
    } else {
        ComparisonOutcome::Unchanged
    };

    Ok(MonthComparison {
        year,
        previous_month,
        current_month,
        previous_total,
        current_total,
        difference,
        magnitude: difference.abs(),
        percentage: difference / previous_total * 100.0,
        outcome,
    })
}

fn month_total(transactions: &[Transaction], year: i32, month: u32) -> f64 {
    let mut amounts: Vec<f64> = transactions
        .iter()
        .filter(|t| t.is_debit() && t.date.year() == year && t.date.month() == month)
        .map(|t| t.amount)
        .collect();
    amounts.sort_by(f64::total_cmp);
    amounts.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::{NaiveDate, Utc};

    fn tx(id: i64, month: u32, amount: f64, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2026, month, 12).unwrap(),
            description: format!("tx{}", id),
            category: "Alimentação".to_string(),
            amount,
            kind,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_savings() {
        let txs = vec![
            tx(1, 1, 600.0, TransactionKind::Debit),
            tx(2, 1, 400.0, TransactionKind::Debit),
            tx(3, 2, 800.0, TransactionKind::Debit),
            tx(4, 2, 3000.0, TransactionKind::Credit),
        ];
        let cmp = compare_months(&txs, 2026, 1, 2).unwrap();
        assert_eq!(cmp.previous_total, 1000.0);
        assert_eq!(cmp.current_total, 800.0);
        assert_eq!(cmp.difference, 200.0);
        assert_eq!(cmp.magnitude, 200.0);
        assert_eq!(cmp.percentage, 20.0);
        assert_eq!(cmp.outcome, ComparisonOutcome::Savings);
    }

    #[test]
    fn test_increase() {
        let txs = vec![
            tx(1, 3, 500.0, TransactionKind::Debit),
            tx(2, 4, 750.0, TransactionKind::Debit),
        ];
        let cmp = compare_months(&txs, 2026, 3, 4).unwrap();
        assert_eq!(cmp.difference, -250.0);
        assert_eq!(cmp.magnitude, 250.0);
        assert_eq!(cmp.percentage, -50.0);
        assert_eq!(cmp.outcome, ComparisonOutcome::Increase);
    }

    #[test]
    fn test_unchanged() {
        let txs = vec![
            tx(1, 5, 300.0, TransactionKind::Debit),
            tx(2, 6, 300.0, TransactionKind::Debit),
        ];
        let cmp = compare_months(&txs, 2026, 5, 6).unwrap();
        assert_eq!(cmp.outcome, ComparisonOutcome::Unchanged);
        assert_eq!(cmp.percentage, 0.0);
    }

    #[test]
    fn test_empty_previous_month_is_guarded() {
        let txs = vec![tx(1, 2, 800.0, TransactionKind::Debit)];
        let err = compare_months(&txs, 2026, 1, 2).unwrap_err();
        assert!(matches!(err, Error::DivisionGuard(_)));
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_other_years_are_ignored() {
        let mut old = tx(1, 1, 999.0, TransactionKind::Debit);
        old.date = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        let txs = vec![old, tx(2, 2, 100.0, TransactionKind::Debit)];
        assert!(compare_months(&txs, 2026, 1, 2).is_err());
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            compare_months(&[], 2026, 0, 2),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            compare_months(&[], 2026, 1, 13),
            Err(Error::InvalidInput(_))
        ));
    }
}
