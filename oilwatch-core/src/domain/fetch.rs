//! FetchResult — outcome of resolving one ticker across sources.

use super::series::PriceSeries;
use super::source::Source;
use serde::Serialize;

/// Result of the fallback resolution for one ticker.
///
/// `full` is the whole retrieved history, `window` its trailing slice sized
/// to the requested display length. When every source failed, `source` is
/// `None` and both series are empty; this is a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult {
    pub source: Option<Source>,
    pub full: PriceSeries,
    pub window: PriceSeries,
}

impl FetchResult {
    /// Build from a winning series, slicing the trailing `days` rows.
    pub fn from_series(source: Source, full: PriceSeries, days: usize) -> Self {
        let window = full.tail(days);
        Self {
            source: Some(source),
            full,
            window,
        }
    }

    /// Terminal "no source produced data" result.
    pub fn unavailable() -> Self {
        Self {
            source: None,
            full: PriceSeries::empty(),
            window: PriceSeries::empty(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.source.is_some() && !self.full.is_empty()
    }
}
