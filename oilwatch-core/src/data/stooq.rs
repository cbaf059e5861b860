//! Stooq data source.
//!
//! Fetches continuous-futures daily quotes as CSV (Date, Open, High, Low,
//! Close, Volume). Stooq takes a point count (`c=`), so we ask for the
//! larger of the caller's minimum and the configured `fetch_days` margin.

use super::normalize::{normalize_ohlc, RawTable};
use super::provider::{DataError, HttpFetch, SourceFetcher};
use crate::config::PipelineConfig;
use crate::domain::{PriceSeries, Source};
use std::sync::Arc;

pub const STOOQ_BASE_URL: &str = "https://stooq.com";

/// Stooq source fetcher.
pub struct StooqFetcher {
    http: Arc<dyn HttpFetch>,
    config: Arc<PipelineConfig>,
    base_url: String,
}

impl StooqFetcher {
    pub fn new(http: Arc<dyn HttpFetch>, config: Arc<PipelineConfig>) -> Self {
        Self {
            http,
            config,
            base_url: STOOQ_BASE_URL.to_string(),
        }
    }

    /// Point the fetcher at another host (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Quote URL for a symbol and point count.
    pub fn quote_url(&self, symbol: &str, points: usize) -> String {
        format!(
            "{}/q/l/?s={symbol}&c={points}&f=sd2t2ohlcv&h&e=csv",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl SourceFetcher for StooqFetcher {
    fn source(&self) -> Source {
        Source::Stooq
    }

    fn try_fetch(&self, ticker: &str, min_observations: usize) -> Result<PriceSeries, DataError> {
        let symbol = self
            .config
            .symbol_for(ticker, Source::Stooq)
            .ok_or_else(|| DataError::UnknownTicker {
                ticker: ticker.to_string(),
                provider: Source::Stooq,
            })?;

        let points = min_observations.max(self.config.fetch_days);
        let body = self.http.get_text(&self.quote_url(symbol, points))?;
        normalize_ohlc(&RawTable::parse(&body)?)
    }
}
