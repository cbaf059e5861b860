//! Relative Strength Index (RSI), simple-average variant.
//!
//! Gains and losses of the day-over-day changes are averaged with a plain
//! rolling mean over `period` changes (no Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (needs period + 1 closes).
//! Edge cases: avg_loss == 0 → 100 if avg_gain > 0, otherwise undefined.

use super::{finite, Indicator};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        (0..closes.len())
            .map(|i| rsi(&closes[..=i], self.period))
            .collect()
    }
}

/// RSI over the last `period` changes of `closes`.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    // summed per window, so a window without losses is exactly zero
    let window = &closes[closes.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(g, l), change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    compute_rsi(avg_gain, avg_loss)
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        None
    } else if avg_loss == 0.0 {
        (avg_gain > 0.0).then_some(100.0)
    } else {
        finite(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_all_gains() {
        let result = Rsi::new(3).compute(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        assert_approx(result[3], 100.0, 1e-6);
        assert_approx(result[5], 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses() {
        let result = Rsi::new(3).compute(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_flat_is_undefined() {
        let result = Rsi::new(3).compute(&[70.0; 6]);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_mixed() {
        // Changes: +0.34, -0.25, -0.48, +0.72
        // RSI[3] = 100 - 100/(1 + 0.34/0.73) = 31.7757...
        // RSI[4]: gains 0.72, losses 0.73 → 100 - 100/(1 + 0.72/0.73) = 49.6551...
        let result = Rsi::new(3).compute(&[44.0, 44.34, 44.09, 43.61, 44.33]);

        assert!(result[..3].iter().all(Option::is_none));
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_simple_average_not_wilder() {
        // 14 losses of 1 then 14 gains of 1: the simple window at the end holds
        // only gains, so RSI is 100. Wilder smoothing would still be < 100.
        let mut closes: Vec<f64> = (0..=14).map(|i| 100.0 - i as f64).collect();
        closes.extend((1..=14).map(|i| 86.0 + i as f64));
        assert_approx(rsi(&closes, 14), 100.0, 1e-9);
    }

    #[test]
    fn rsi_needs_period_plus_one_closes() {
        let closes: Vec<f64> = (0..14).map(|i| 50.0 + (i % 3) as f64).collect();
        assert_eq!(rsi(&closes, 14), None);
        let mut longer = closes.clone();
        longer.push(49.0);
        assert!(rsi(&longer, 14).is_some());
    }

    #[test]
    fn rsi_bounds() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        for (i, v) in Rsi::new(3).compute(&closes).into_iter().enumerate() {
            if let Some(v) = v {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 14);
        assert_eq!(Rsi::new(14).name(), "rsi_14");
    }
}
