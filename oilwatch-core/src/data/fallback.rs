//! Ordered source fallback.
//!
//! Sources are tried in a fixed priority order and the first one that
//! produces a non-empty series wins. There is no merging and no quality
//! comparison at this stage: a shorter primary series still beats a longer
//! fallback one.

use super::fred::FredFetcher;
use super::provider::{HttpFetch, SourceFetcher};
use super::stooq::StooqFetcher;
use crate::config::PipelineConfig;
use crate::domain::{FetchResult, Source};
use std::sync::Arc;

/// Resolves a ticker against an ordered list of sources.
pub struct PriceResolver {
    fetchers: Vec<Box<dyn SourceFetcher>>,
    min_observations: usize,
}

impl PriceResolver {
    /// Resolver over explicit fetchers, tried in the given order.
    pub fn new(fetchers: Vec<Box<dyn SourceFetcher>>, min_observations: usize) -> Self {
        Self {
            fetchers,
            min_observations,
        }
    }

    /// Resolver with one fetcher per source in `config.source_order`.
    pub fn from_config(config: Arc<PipelineConfig>, http: Arc<dyn HttpFetch>) -> Self {
        let fetchers = config
            .source_order
            .iter()
            .map(|&source| build_fetcher(source, http.clone(), config.clone()))
            .collect();
        Self::new(fetchers, config.fetch_days)
    }

    /// Sources in priority order.
    pub fn sources(&self) -> Vec<Source> {
        self.fetchers.iter().map(|f| f.source()).collect()
    }

    /// The fetcher for `source`, if it is part of this resolver.
    pub fn fetcher(&self, source: Source) -> Option<&dyn SourceFetcher> {
        self.fetchers
            .iter()
            .find(|f| f.source() == source)
            .map(|f| f.as_ref())
    }

    /// Fetch `ticker` from the first source that returns data.
    ///
    /// `window` holds the last `days` rows of the winning series. If every
    /// source fails the result is [`FetchResult::unavailable`].
    pub fn resolve(&self, ticker: &str, days: usize) -> FetchResult {
        let min_observations = days.max(self.min_observations);

        for fetcher in &self.fetchers {
            if let Some(series) = fetcher.fetch(ticker, min_observations) {
                tracing::info!(
                    ticker,
                    source = %fetcher.source(),
                    rows = series.len(),
                    "resolved"
                );
                return FetchResult::from_series(fetcher.source(), series, days);
            }
        }

        tracing::warn!(ticker, sources = ?self.sources(), "no source returned data");
        FetchResult::unavailable()
    }
}

/// Concrete fetcher for a source.
pub fn build_fetcher(
    source: Source,
    http: Arc<dyn HttpFetch>,
    config: Arc<PipelineConfig>,
) -> Box<dyn SourceFetcher> {
    match source {
        Source::Stooq => Box::new(StooqFetcher::new(http, config)),
        Source::Fred => Box::new(FredFetcher::new(http, config)),
    }
}
