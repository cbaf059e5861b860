//! Data acquisition: source fetchers, normalization, fallback, reconciliation.

pub mod fallback;
pub mod fred;
pub mod http;
pub mod normalize;
pub mod provider;
pub mod reconcile;
pub mod stooq;

pub use fallback::{build_fetcher, PriceResolver};
pub use fred::FredFetcher;
pub use http::BlockingHttp;
pub use normalize::{normalize_close_only, normalize_ohlc, RawTable};
pub use provider::{DataError, HttpFetch, SourceFetcher};
pub use reconcile::{merge_closes, Reconciler, DEFAULT_RECONCILE_THRESHOLD};
pub use stooq::StooqFetcher;
