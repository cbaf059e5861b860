//! Domain types: observations, price series, sources, fetch results.

pub mod fetch;
pub mod observation;
pub mod series;
pub mod source;

pub use fetch::FetchResult;
pub use observation::Observation;
pub use series::PriceSeries;
pub use source::Source;
