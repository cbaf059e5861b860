//! OilWatch Core — daily commodity prices with source fallback and indicators.
//!
//! This crate contains the acquisition-and-indicator pipeline:
//! - Domain types (observations, price series, sources, fetch results)
//! - Source fetchers (Stooq, FRED) with per-source normalization
//! - Ordered fallback between sources
//! - Gap reconciliation for short primary histories
//! - Indicators (percent change, SMA, simple-average RSI)
//! - Display windows with indicator warm-up
//! - TOML-backed configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod window;

pub use config::{ConfigError, PipelineConfig};
pub use pipeline::{Pipeline, TickerReport};
