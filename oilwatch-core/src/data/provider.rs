//! Source fetcher trait and structured error types.
//!
//! The SourceFetcher trait abstracts over upstream providers (Stooq, FRED)
//! so the resolver can walk an ordered list of them and tests can swap in
//! fakes. Errors stay inside the fetcher: callers only ever see "a series"
//! or "no data".

use crate::domain::{PriceSeries, Source};
use thiserror::Error;

/// Structured error types for source access.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network, timeout, or non-success HTTP status reaching a source.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response received but its schema was not recognized.
    #[error("response format not recognized: {0}")]
    Format(String),

    #[error("ticker '{ticker}' has no symbol configured for {provider}")]
    UnknownTicker { ticker: String, provider: Source },
}

/// Bounded-timeout GET capability.
///
/// Injected into fetchers so tests can serve canned bodies instead of
/// touching the network.
pub trait HttpFetch: Send + Sync {
    /// GET `url` and return the body as text.
    fn get_text(&self, url: &str) -> Result<String, DataError>;
}

/// One upstream source for daily closes.
pub trait SourceFetcher: Send + Sync {
    /// Which source this fetcher reads.
    fn source(&self) -> Source;

    /// Retrieve and normalize the series for `ticker`, asking upstream for
    /// at least `min_observations` points where the source supports it.
    fn try_fetch(&self, ticker: &str, min_observations: usize) -> Result<PriceSeries, DataError>;

    /// Like [`try_fetch`](Self::try_fetch), but absorbs every error and
    /// reports an empty series as absent.
    fn fetch(&self, ticker: &str, min_observations: usize) -> Option<PriceSeries> {
        match self.try_fetch(ticker, min_observations) {
            Ok(series) if series.is_empty() => {
                tracing::warn!(source = %self.source(), ticker, "source returned no rows");
                None
            }
            Ok(series) => {
                tracing::debug!(source = %self.source(), ticker, rows = series.len(), "fetched");
                Some(series)
            }
            Err(e) => {
                tracing::warn!(source = %self.source(), ticker, error = %e, "fetch failed");
                None
            }
        }
    }
}
