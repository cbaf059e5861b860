//! Point-in-time summary of a close series.

use super::{pct_change, rsi, sma};
use crate::domain::PriceSeries;
use serde::Serialize;

/// Indicator values at the last observation of a series.
///
/// Derived on demand, never stored. Every field is `None` when the history
/// is too short for it; an empty series yields an all-`None` snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub last_close: Option<f64>,
    pub pct_change_1: Option<f64>,
    pub pct_change_7: Option<f64>,
    pub pct_change_30: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub rsi_14: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn compute(series: &PriceSeries) -> Self {
        Self::from_closes(&series.closes())
    }

    pub fn from_closes(closes: &[f64]) -> Self {
        Self {
            last_close: closes.last().copied().filter(|c| c.is_finite()),
            pct_change_1: pct_change(closes, 1),
            pct_change_7: pct_change(closes, 7),
            pct_change_30: pct_change(closes, 30),
            sma_20: sma(closes, 20),
            sma_50: sma(closes, 50),
            sma_200: sma(closes, 200),
            rsi_14: rsi(closes, 14),
        }
    }

    /// True when nothing could be computed.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn empty_series_is_all_undefined() {
        let snap = IndicatorSnapshot::compute(&PriceSeries::empty());
        assert!(snap.is_empty());
        assert_eq!(snap.rsi_14, None);
    }

    #[test]
    fn short_series_defines_only_what_it_can() {
        let closes: Vec<f64> = (0..25).map(|i| 70.0 + i as f64).collect();
        let snap = IndicatorSnapshot::from_closes(&closes);

        assert_eq!(snap.last_close, Some(94.0));
        assert_approx(snap.pct_change_1, (94.0 / 93.0 - 1.0) * 100.0, DEFAULT_EPSILON);
        assert_approx(snap.pct_change_7, (94.0 / 87.0 - 1.0) * 100.0, DEFAULT_EPSILON);
        assert_eq!(snap.pct_change_30, None);
        assert_approx(snap.sma_20, 84.5, DEFAULT_EPSILON);
        assert_eq!(snap.sma_50, None);
        assert_eq!(snap.sma_200, None);
        assert_eq!(snap.rsi_14, Some(100.0));
    }

    #[test]
    fn serializes_undefined_as_null() {
        let snap = IndicatorSnapshot::from_closes(&[70.0, 71.0]);
        let json = serde_json::to_value(snap).unwrap();
        assert_eq!(json["sma_20"], serde_json::Value::Null);
        assert_eq!(json["last_close"], serde_json::json!(71.0));
    }
}
