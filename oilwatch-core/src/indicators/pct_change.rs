//! Percent change over N observations.
//!
//! pct[t] = (close[t] / close[t-n] - 1) * 100
//! Lookback: n. Undefined when close[t-n] is zero.

use super::{finite, Indicator};

#[derive(Debug, Clone)]
pub struct PctChange {
    period: usize,
    name: String,
}

impl PctChange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "percent-change period must be >= 1");
        Self {
            period,
            name: format!("pct_change_{period}"),
        }
    }
}

impl Indicator for PctChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        (0..closes.len())
            .map(|i| pct_change(&closes[..=i], self.period))
            .collect()
    }
}

/// Percent change from `n` observations back to the last close.
///
/// Defined only when more than `n` closes exist.
pub fn pct_change(closes: &[f64], n: usize) -> Option<f64> {
    if closes.len() <= n {
        return None;
    }
    let curr = closes[closes.len() - 1];
    let prev = closes[closes.len() - 1 - n];
    if prev == 0.0 {
        return None;
    }
    finite((curr / prev - 1.0) * 100.0)
}
