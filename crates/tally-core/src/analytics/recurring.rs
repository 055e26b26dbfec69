//! Recurring (fixed) expense classification
//!
//! Rent, subscriptions and other obligations repeat under the same
//! description. They are projected month by month, while everything else is
//! variable spending projected from a daily average.

use std::collections::{BTreeMap, HashSet};

use crate::models::Transaction;

use super::types::{RecurringClassification, RecurringExpense};

/// Group debits by description and split recurring groups from variable debits
///
/// A description is recurring when it occurs more than once. With
/// `strict_amounts`, every occurrence must also carry the same amount.
pub fn classify_recurring(
    transactions: &[Transaction],
    strict_amounts: bool,
) -> RecurringClassification {
    let mut groups: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_debit()) {
        groups.entry(tx.description.as_str()).or_default().push(tx);
    }

    let mut recurring = Vec::new();
    let mut recurring_names: HashSet<&str> = HashSet::new();

    for (description, group) in &groups {
        if !is_recurring(group, strict_amounts) {
            continue;
        }

        // Latest occurrence decides the reported category
        let Some(latest) = group.iter().max_by_key(|t| (t.date, t.id)) else {
            continue;
        };

        let mut amounts: Vec<f64> = group.iter().map(|t| t.amount).collect();
        amounts.sort_by(f64::total_cmp);
        let mean_amount = amounts.iter().sum::<f64>() / amounts.len() as f64;

        recurring.push(RecurringExpense {
            description: description.to_string(),
            category: latest.category.clone(),
            mean_amount,
            last_occurrence: latest.date,
            occurrence_count: group.len(),
        });
        recurring_names.insert(*description);
    }

    let variable = transactions
        .iter()
        .filter(|t| t.is_debit() && !recurring_names.contains(t.description.as_str()))
        .cloned()
        .collect();

    RecurringClassification {
        recurring,
        variable,
    }
}

fn is_recurring(group: &[&Transaction], strict_amounts: bool) -> bool {
    if group.len() < 2 {
        return false;
    }
    if strict_amounts {
        let first = group[0].amount;
        return group.iter().all(|t| t.amount == first);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::{NaiveDate, Utc};

    fn tx(id: i64, month: u32, description: &str, amount: f64) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2026, month, 5).unwrap(),
            description: description.to_string(),
            category: "Moradia".to_string(),
            amount,
            kind: TransactionKind::Debit,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_occurrence_is_never_recurring() {
        let txs = vec![tx(1, 1, "Aluguel", 1200.0), tx(2, 1, "Mercado", 450.0)];
        for strict in [false, true] {
            let result = classify_recurring(&txs, strict);
            assert!(result.recurring.is_empty());
            assert_eq!(result.variable.len(), 2);
        }
    }

    #[test]
    fn test_repeated_description_is_recurring() {
        let txs = vec![
            tx(1, 1, "Aluguel", 1200.0),
            tx(2, 2, "Aluguel", 1250.0),
            tx(3, 3, "Aluguel", 1250.0),
            tx(4, 2, "Mercado", 450.0),
        ];
        let result = classify_recurring(&txs, false);

        assert_eq!(result.recurring.len(), 1);
        let rent = &result.recurring[0];
        assert_eq!(rent.description, "Aluguel");
        assert_eq!(rent.occurrence_count, 3);
        assert_eq!(rent.last_occurrence, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert!((rent.mean_amount - 1233.333_333).abs() < 1e-3);

        assert_eq!(result.variable.len(), 1);
        assert_eq!(result.variable[0].description, "Mercado");
    }

    #[test]
    fn test_strict_amounts_requires_identical_values() {
        let txs = vec![
            tx(1, 1, "Aluguel", 1200.0),
            tx(2, 2, "Aluguel", 1250.0),
            tx(3, 1, "Netflix", 39.9),
            tx(4, 2, "Netflix", 39.9),
        ];
        let result = classify_recurring(&txs, true);

        assert_eq!(result.recurring.len(), 1);
        assert_eq!(result.recurring[0].description, "Netflix");
        assert_eq!(result.recurring[0].mean_amount, 39.9);
        // Rent with a price change falls back to variable spending
        assert_eq!(result.variable.len(), 2);
        assert!(result.variable.iter().all(|t| t.description == "Aluguel"));
    }

    #[test]
    fn test_credits_are_ignored() {
        let mut salary = tx(1, 1, "Salário", 5000.0);
        salary.kind = TransactionKind::Credit;
        let mut salary2 = tx(2, 2, "Salário", 5000.0);
        salary2.kind = TransactionKind::Credit;

        let result = classify_recurring(&[salary, salary2], false);
        assert!(result.recurring.is_empty());
        assert!(result.variable.is_empty());
    }

    #[test]
    fn test_latest_category_wins_and_output_sorted() {
        let mut moved = tx(2, 2, "Netflix", 39.9);
        moved.category = "Lazer".to_string();
        let txs = vec![
            tx(1, 1, "Netflix", 39.9),
            moved,
            tx(3, 1, "Aluguel", 1200.0),
            tx(4, 2, "Aluguel", 1200.0),
        ];
        let result = classify_recurring(&txs, false);
        let names: Vec<_> = result.recurring.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(names, vec!["Aluguel", "Netflix"]);
        assert_eq!(result.recurring[1].category, "Lazer");
    }
}
