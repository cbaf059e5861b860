//! Pipeline configuration.
//!
//! One immutable structure holds the ticker-to-symbol table, the source
//! priority order and the window sizes. It is built once at startup
//! (defaults or a TOML file) and passed explicitly into the resolver, so
//! tests can substitute their own tables and fake sources.

use crate::data::DEFAULT_RECONCILE_THRESHOLD;
use crate::domain::Source;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Per-source identifiers for one logical ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Logical name, matched case-insensitively (e.g. "WTI").
    pub name: String,
    /// Stooq symbol (e.g. "cl.f").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stooq: Option<String>,
    /// FRED series id (e.g. "DCOILWTICO").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fred: Option<String>,
}

impl TickerConfig {
    pub fn new(name: &str, stooq: &str, fred: &str) -> Self {
        Self {
            name: name.to_string(),
            stooq: Some(stooq.to_string()),
            fred: Some(fred.to_string()),
        }
    }

    pub fn symbol(&self, source: Source) -> Option<&str> {
        match source {
            Source::Stooq => self.stooq.as_deref(),
            Source::Fred => self.fred.as_deref(),
        }
    }
}

/// HTTP settings for the blocking fetch client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (compatible; OilBot/1.0; +https://stooq.com)".into(),
        }
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sources in priority order; the first non-empty result wins.
    pub source_order: Vec<Source>,
    /// Source fetched by the reconciler when the primary history is short.
    pub reconcile_source: Source,
    /// Minimum points requested from sources that paginate.
    pub fetch_days: usize,
    /// Rows shown in the chart window.
    pub display_days: usize,
    /// RSI period, also the warm-up of the chart window.
    pub rsi_period: usize,
    /// Below this many closes the reconciler merges in the fallback source.
    pub reconcile_threshold: usize,
    pub http: HttpConfig,
    pub tickers: Vec<TickerConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_order: vec![Source::Stooq, Source::Fred],
            reconcile_source: Source::Fred,
            fetch_days: 60,
            display_days: 14,
            rsi_period: 14,
            reconcile_threshold: DEFAULT_RECONCILE_THRESHOLD,
            http: HttpConfig::default(),
            tickers: vec![
                TickerConfig::new("WTI", "cl.f", "DCOILWTICO"),
                TickerConfig::new("BRENT", "brn.f", "DCOILBRENTEU"),
            ],
        }
    }
}

impl PipelineConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_order.is_empty() {
            return Err(ConfigError::Invalid("source_order is empty".into()));
        }
        for (i, source) in self.source_order.iter().enumerate() {
            if self.source_order[..i].contains(source) {
                return Err(ConfigError::Invalid(format!(
                    "source '{source}' listed twice in source_order"
                )));
            }
        }
        if self.display_days == 0 {
            return Err(ConfigError::Invalid("display_days must be >= 1".into()));
        }
        if self.rsi_period == 0 {
            return Err(ConfigError::Invalid("rsi_period must be >= 1".into()));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be >= 1".into()));
        }
        for (i, ticker) in self.tickers.iter().enumerate() {
            if ticker.name.trim().is_empty() {
                return Err(ConfigError::Invalid("ticker with empty name".into()));
            }
            let dup = self.tickers[..i]
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(&ticker.name));
            if dup {
                return Err(ConfigError::Invalid(format!(
                    "ticker '{}' defined twice",
                    ticker.name
                )));
            }
        }
        Ok(())
    }

    /// Look up a ticker by logical name, ignoring case.
    pub fn ticker(&self, name: &str) -> Option<&TickerConfig> {
        self.tickers
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Source-specific symbol for a ticker.
    pub fn symbol_for(&self, ticker: &str, source: Source) -> Option<&str> {
        self.ticker(ticker).and_then(|t| t.symbol(source))
    }

    /// Logical ticker names in configured order.
    pub fn ticker_names(&self) -> Vec<&str> {
        self.tickers.iter().map(|t| t.name.as_str()).collect()
    }

    /// History requested per resolve: enough for the indicators and the
    /// chart window, whichever is larger.
    pub fn history_days(&self) -> usize {
        self.fetch_days.max(self.display_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source_order, vec![Source::Stooq, Source::Fred]);
        assert_eq!(config.history_days(), 60);
    }

    #[test]
    fn symbol_lookup_is_case_insensitive() {
        let config = PipelineConfig::default();
        assert_eq!(config.symbol_for("wti", Source::Stooq), Some("cl.f"));
        assert_eq!(config.symbol_for("Brent", Source::Fred), Some("DCOILBRENTEU"));
        assert_eq!(config.symbol_for("GOLD", Source::Stooq), None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            display_days = 21
            source_order = ["fred"]

            [[tickers]]
            name = "WTI"
            fred = "DCOILWTICO"
            "#,
        )
        .unwrap();

        assert_eq!(config.display_days, 21);
        assert_eq!(config.fetch_days, 60);
        assert_eq!(config.source_order, vec![Source::Fred]);
        assert_eq!(config.symbol_for("WTI", Source::Stooq), None);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn rejects_duplicate_sources() {
        let err = PipelineConfig::from_toml(r#"source_order = ["stooq", "stooq"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_duplicate_tickers_ignoring_case() {
        let mut config = PipelineConfig::default();
        config.tickers.push(TickerConfig::new("wti", "x", "y"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_source_name() {
        let err = PipelineConfig::from_toml(r#"source_order = ["bloomberg"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let config = PipelineConfig::default();
        let text = config.to_toml().unwrap();
        let back = PipelineConfig::from_toml(&text).unwrap();
        assert_eq!(config, back);
    }
}
