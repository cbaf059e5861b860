//! FRED data source.
//!
//! Downloads the full history of a daily spot series as CSV. FRED returns
//! a single value column, so pseudo-OHLC is synthesized during
//! normalization.

use super::normalize::{normalize_close_only, RawTable};
use super::provider::{DataError, HttpFetch, SourceFetcher};
use crate::config::PipelineConfig;
use crate::domain::{PriceSeries, Source};
use std::sync::Arc;

pub const FRED_BASE_URL: &str = "https://fred.stlouisfed.org";

/// FRED source fetcher.
pub struct FredFetcher {
    http: Arc<dyn HttpFetch>,
    config: Arc<PipelineConfig>,
    base_url: String,
}

impl FredFetcher {
    pub fn new(http: Arc<dyn HttpFetch>, config: Arc<PipelineConfig>) -> Self {
        Self {
            http,
            config,
            base_url: FRED_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn series_url(&self, series_id: &str) -> String {
        format!(
            "{}/graph/fredgraph.csv?id={series_id}",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl SourceFetcher for FredFetcher {
    fn source(&self) -> Source {
        Source::Fred
    }

    /// The graph endpoint always returns the whole history, so
    /// `min_observations` needs no request parameter.
    fn try_fetch(&self, ticker: &str, _min_observations: usize) -> Result<PriceSeries, DataError> {
        let series_id = self
            .config
            .symbol_for(ticker, Source::Fred)
            .ok_or_else(|| DataError::UnknownTicker {
                ticker: ticker.to_string(),
                provider: Source::Fred,
            })?;

        let body = self.http.get_text(&self.series_url(series_id))?;
        normalize_close_only(&RawTable::parse(&body)?, series_id)
    }
}
