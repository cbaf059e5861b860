//! Observation — one daily price row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily price observation for a single ticker.
///
/// `close` is always defined. Open/high/low are optional: rows merged in
/// from a close-only series, or rows whose upstream O/H/L did not parse,
/// carry `None` rather than a NaN sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
}

impl Observation {
    /// Observation with full OHLC.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
        }
    }

    /// Observation with only a close price.
    pub fn close_only(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
        }
    }

    /// Returns true if open, high and low are all present.
    pub fn has_ohlc(&self) -> bool {
        self.open.is_some() && self.high.is_some() && self.low.is_some()
    }

    /// OHLC sanity check: high >= max(open, close), low <= min(open, close).
    ///
    /// Only meaningful for synthesized rows; primary-source rows are passed
    /// through as reported.
    pub fn is_sane(&self) -> bool {
        match (self.open, self.high, self.low) {
            (Some(open), Some(high), Some(low)) => {
                high >= open.max(self.close) && low <= open.min(self.close) && high >= low
            }
            _ => false,
        }
    }
}
