//! Indicator engine.
//!
//! Indicators are pure functions of an ascending close series. Each one
//! produces an output of the same length whose first `lookback()` entries
//! are `None` (warm-up); later entries are `None` whenever the value is
//! undefined (zero denominator, non-finite result). A real zero is always
//! `Some(0.0)`.

pub mod pct_change;
pub mod rsi;
pub mod sma;
pub mod snapshot;

pub use pct_change::{pct_change, PctChange};
pub use rsi::{rsi, Rsi};
pub use sma::{sma, Sma};
pub use snapshot::IndicatorSnapshot;

/// A close-price indicator.
///
/// # Look-ahead guard
/// The value at index t may only depend on closes up to and including t, so
/// computing over a truncated series yields a prefix of the full output.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g. "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading observations with no defined value.
    fn lookback(&self) -> usize;

    /// Compute over the whole series; output has the same length as `closes`.
    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>>;

    /// Value at the last observation.
    fn last(&self, closes: &[f64]) -> Option<f64> {
        self.compute(closes).last().copied().flatten()
    }
}

/// Keep only finite values.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: Option<f64>, expected: f64, epsilon: f64) {
    let actual = actual.unwrap_or_else(|| panic!("expected {expected}, got undefined"));
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
