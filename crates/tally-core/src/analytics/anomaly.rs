//! Z-score style anomaly detection over debit amounts

use std::cmp::Ordering;

use tracing::debug;

use crate::models::Transaction;

use super::stats::{summarize, MIN_STATISTICAL_SAMPLES};
use super::types::{Anomaly, AnomalyReport, AnomalyThreshold};

/// Flag debits strictly above mean + k·stddev
///
/// Needs at least three debits; with fewer the report carries no threshold
/// and no anomalies.
pub fn detect_anomalies(transactions: &[Transaction], sensitivity: f64) -> AnomalyReport {
    let debits: Vec<&Transaction> = transactions.iter().filter(|t| t.is_debit()).collect();

    if debits.len() < MIN_STATISTICAL_SAMPLES {
        debug!(found = debits.len(), "Too few debits for anomaly detection");
        return AnomalyReport::insufficient(debits.len());
    }

    let amounts: Vec<f64> = debits.iter().map(|t| t.amount).collect();
    let Some(stats) = summarize(&amounts) else {
        return AnomalyReport::insufficient(debits.len());
    };
    let threshold = stats.upper_bound(sensitivity);

    let mut anomalies: Vec<Anomaly> = debits
        .iter()
        .filter(|t| t.amount > threshold)
        .map(|t| to_anomaly(t))
        .collect();
    sort_anomalies(&mut anomalies);

    debug!(
        sample_size = stats.count,
        mean = stats.mean,
        threshold,
        flagged = anomalies.len(),
        "Anomaly detection complete"
    );

    AnomalyReport {
        sample_size: stats.count,
        threshold: Some(AnomalyThreshold {
            sample_size: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            sensitivity,
            threshold,
        }),
        anomalies,
    }
}

pub(crate) fn to_anomaly(tx: &Transaction) -> Anomaly {
    Anomaly {
        transaction_id: tx.id,
        date: tx.date,
        description: tx.description.clone(),
        category: tx.category.clone(),
        amount: tx.amount,
    }
}

/// Largest first, then date, then ID
pub(crate) fn sort_anomalies(anomalies: &mut [Anomaly]) {
    anomalies.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.transaction_id.cmp(&b.transaction_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::{NaiveDate, Utc};

    fn debit(id: i64, amount: f64) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Duration::days(id),
            description: format!("Compra {}", id),
            category: "Diversos".to_string(),
            amount,
            kind: TransactionKind::Debit,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insufficient_data() {
        for n in 0..3 {
            let txs: Vec<_> = (0..n).map(|i| debit(i, 1000.0 * (i + 1) as f64)).collect();
            let report = detect_anomalies(&txs, 1.5);
            assert!(report.is_insufficient());
            assert!(report.anomalies.is_empty());
            assert_eq!(report.sample_size, n as usize);
        }
    }

    #[test]
    fn test_credits_do_not_count_toward_sample() {
        let mut txs = vec![debit(1, 10.0), debit(2, 20.0)];
        txs.push(Transaction {
            kind: TransactionKind::Credit,
            ..debit(3, 5000.0)
        });
        let report = detect_anomalies(&txs, 1.5);
        assert!(report.is_insufficient());
    }

    #[test]
    fn test_flags_large_expense() {
        let txs = vec![
            debit(1, 50.0),
            debit(2, 55.0),
            debit(3, 45.0),
            debit(4, 60.0),
            debit(5, 40.0),
            debit(6, 900.0),
        ];
        let report = detect_anomalies(&txs, 1.5);
        let threshold = report.threshold.as_ref().unwrap();
        assert_eq!(threshold.sample_size, 6);
        assert!((threshold.mean - 191.666_666_666).abs() < 1e-6);
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].transaction_id, 6);
        assert_eq!(report.anomalies[0].amount, 900.0);
    }

    #[test]
    fn test_value_equal_to_threshold_is_not_flagged() {
        // mean 2, sample stddev 1: with k = 1 the threshold is exactly 3
        let txs = vec![debit(1, 1.0), debit(2, 2.0), debit(3, 3.0)];
        let report = detect_anomalies(&txs, 1.0);
        assert_eq!(report.threshold.as_ref().unwrap().threshold, 3.0);
        assert!(report.anomalies.is_empty());

        // Identical amounts: stddev 0, threshold equals every amount
        let flat = vec![debit(1, 10.0), debit(2, 10.0), debit(3, 10.0)];
        assert!(detect_anomalies(&flat, 2.0).anomalies.is_empty());
    }

    #[test]
    fn test_sensitivity_changes_result() {
        // mean ~4.17, stddev ~3.19: 10 sits between the 1.5 and 2.0 thresholds
        let txs = vec![
            debit(1, 1.0),
            debit(2, 2.0),
            debit(3, 3.0),
            debit(4, 4.0),
            debit(5, 5.0),
            debit(6, 10.0),
        ];
        assert_eq!(detect_anomalies(&txs, 1.5).anomalies.len(), 1);
        assert!(detect_anomalies(&txs, 2.0).anomalies.is_empty());
    }

    #[test]
    fn test_order_independent() {
        let txs = vec![
            debit(1, 12.3),
            debit(2, 400.0),
            debit(3, 7.7),
            debit(4, 15.0),
            debit(5, 390.0),
            debit(6, 11.1),
            debit(7, 9.9),
        ];
        let mut reversed = txs.clone();
        reversed.reverse();

        let a = detect_anomalies(&txs, 1.0);
        let b = detect_anomalies(&reversed, 1.0);
        assert_eq!(a, b);
        assert_eq!(a.anomalies.len(), 2);
        // Sorted largest first
        assert_eq!(a.anomalies[0].amount, 400.0);
        assert_eq!(a.anomalies[1].amount, 390.0);
    }
}
