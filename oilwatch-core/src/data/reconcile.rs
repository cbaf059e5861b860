//! Short-history reconciliation.
//!
//! When the primary series has fewer than `threshold` closes, the
//! designated fallback source is fetched and its closes fill the dates the
//! primary series lacks. The merge is an outer join on date where primary
//! closes always win; open/high/low are not reconciled, so rows that exist
//! only in the fallback carry `None` for them.

use super::provider::SourceFetcher;
use crate::domain::{Observation, PriceSeries};
use std::collections::BTreeMap;

/// Default minimum number of closes before reconciliation is skipped.
pub const DEFAULT_RECONCILE_THRESHOLD: usize = 40;

/// Fills gaps in a short primary series from a fallback source.
pub struct Reconciler<'a> {
    fallback: &'a dyn SourceFetcher,
    threshold: usize,
}

impl<'a> Reconciler<'a> {
    pub fn new(fallback: &'a dyn SourceFetcher, threshold: usize) -> Self {
        Self {
            fallback,
            threshold,
        }
    }

    /// True if `series` is short enough to need the fallback.
    pub fn needs_fill(&self, series: &PriceSeries) -> bool {
        series.len() < self.threshold
    }

    /// Merge fallback closes into `series` if it is short.
    ///
    /// A series at or above the threshold is returned untouched without
    /// contacting the fallback. A failed fallback fetch also returns the
    /// input unchanged.
    pub fn reconcile(&self, series: PriceSeries, ticker: &str) -> PriceSeries {
        if !self.needs_fill(&series) {
            tracing::debug!(ticker, rows = series.len(), "history sufficient, no reconcile");
            return series;
        }

        let Some(fallback) = self.fallback.fetch(ticker, self.threshold) else {
            return series;
        };

        let before = series.len();
        let merged = merge_closes(series, &fallback);
        tracing::info!(
            ticker,
            source = %self.fallback.source(),
            before,
            after = merged.len(),
            "merged fallback closes"
        );
        merged
    }
}

/// Outer join on date. Primary rows are kept as they are; fallback rows are
/// added only for dates the primary lacks, and only their close.
pub fn merge_closes(primary: PriceSeries, fallback: &PriceSeries) -> PriceSeries {
    let mut by_date: BTreeMap<_, Observation> = fallback
        .observations()
        .iter()
        .map(|o| (o.date, Observation::close_only(o.date, o.close)))
        .collect();

    for obs in primary.into_observations() {
        by_date.insert(obs.date, obs);
    }

    PriceSeries::from_unordered(by_date.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::DataError;
    use crate::domain::Source;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
    }

    fn series(rows: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::from_unordered(
            rows.iter()
                .map(|&(day, close)| Observation::new(d(day), close, close + 1.0, close - 1.0, close))
                .collect(),
        )
    }

    struct Fallback {
        series: Option<PriceSeries>,
        calls: AtomicUsize,
    }

    impl Fallback {
        fn new(series: Option<PriceSeries>) -> Self {
            Self {
                series,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SourceFetcher for Fallback {
        fn source(&self) -> Source {
            Source::Fred
        }

        fn try_fetch(&self, _ticker: &str, _min: usize) -> Result<PriceSeries, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.series
                .clone()
                .ok_or_else(|| DataError::Transport("down".into()))
        }
    }

    #[test]
    fn fills_missing_dates_without_overwriting() {
        let primary = series(&[(2, 70.0), (4, 72.0)]);
        let fallback = Fallback::new(Some(series(&[(1, 60.0), (2, 99.0), (3, 61.0), (4, 99.0)])));

        let merged = Reconciler::new(&fallback, 40).reconcile(primary, "WTI");

        assert_eq!(merged.dates(), vec![d(1), d(2), d(3), d(4)]);
        assert_eq!(merged.closes(), vec![60.0, 70.0, 61.0, 72.0]);
    }

    #[test]
    fn primary_rows_keep_their_ohlc_and_filled_rows_have_none() {
        let primary = series(&[(2, 70.0)]);
        let fallback = Fallback::new(Some(series(&[(1, 60.0)])));

        let merged = Reconciler::new(&fallback, 40).reconcile(primary, "WTI");
        let rows = merged.observations();

        assert_eq!(rows[0].open, None);
        assert_eq!(rows[0].high, None);
        assert_eq!(rows[0].low, None);
        assert_eq!(rows[1].high, Some(71.0));
    }

    #[test]
    fn sufficient_history_skips_fallback() {
        let rows: Vec<(u32, f64)> = (1..=30).map(|i| (i, i as f64)).collect();
        let primary = series(&rows);
        let fallback = Fallback::new(Some(series(&[(1, 0.0)])));

        let out = Reconciler::new(&fallback, 30).reconcile(primary.clone(), "WTI");

        assert_eq!(out, primary);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_fallback_returns_input() {
        let primary = series(&[(2, 70.0), (3, 71.0)]);
        let fallback = Fallback::new(None);

        let out = Reconciler::new(&fallback, 40).reconcile(primary.clone(), "WTI");

        assert_eq!(out, primary);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_primary_becomes_fallback_closes() {
        let fallback = Fallback::new(Some(series(&[(1, 60.0), (2, 61.0)])));
        let merged = Reconciler::new(&fallback, 40).reconcile(PriceSeries::empty(), "WTI");
        assert_eq!(merged.closes(), vec![60.0, 61.0]);
        assert!(merged.observations().iter().all(|o| !o.has_ohlc()));
    }
}
