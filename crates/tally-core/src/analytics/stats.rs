//! Descriptive statistics over debit amounts

/// Fewest samples for which a standard deviation is meaningful
pub const MIN_STATISTICAL_SAMPLES: usize = 3;

/// Mean and sample standard deviation of a set of amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1); 0 for a single value
    pub std_dev: f64,
}

impl DistributionStats {
    /// mean + k·stddev
    pub fn upper_bound(&self, sensitivity: f64) -> f64 {
        self.mean + sensitivity * self.std_dev
    }
}

/// Summarize amounts, or `None` for an empty slice
///
/// Values are summed in ascending order so the result does not depend on the
/// order the caller supplied them in.
pub fn summarize(values: &[f64]) -> Option<DistributionStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;

    let std_dev = if sorted.len() < 2 {
        0.0
    } else {
        let sum_sq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (n - 1.0)).sqrt()
    };

    Some(DistributionStats {
        count: sorted.len(),
        mean,
        std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_summarize_single() {
        let stats = summarize(&[42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_summarize_sample_std_dev() {
        let stats = summarize(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.std_dev, 1.0);
        assert_eq!(stats.upper_bound(1.5), 3.5);

        // 2, 4, 4, 4, 5, 5, 7, 9: sample variance 32/7
        let stats = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_is_order_independent() {
        let a = summarize(&[0.1, 1e9, 0.2, 0.3, 17.25]).unwrap();
        let b = summarize(&[17.25, 0.3, 1e9, 0.2, 0.1]).unwrap();
        assert_eq!(a, b);
    }
}
