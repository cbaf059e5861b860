//! Per-ticker pipeline: resolve → reconcile → indicators.
//!
//! Each report is built from scratch and runs to completion before the next
//! ticker starts. Nothing is cached between calls.

use crate::config::PipelineConfig;
use crate::data::{build_fetcher, HttpFetch, PriceResolver, Reconciler, SourceFetcher};
use crate::domain::{FetchResult, PriceSeries, Source};
use crate::indicators::IndicatorSnapshot;
use crate::window::{chart_panel, trend_panel, ChartPanel, TrendPanel};
use serde::Serialize;
use std::sync::Arc;

/// Everything the presentation layer needs for one ticker.
#[derive(Debug, Clone, Serialize)]
pub struct TickerReport {
    pub ticker: String,
    /// Raw resolution result (provenance, full history, chart window).
    pub fetch: FetchResult,
    /// Series the indicators were computed on; differs from `fetch.full`
    /// only when fallback closes were merged in.
    pub series: PriceSeries,
    pub indicators: IndicatorSnapshot,
    pub reconciled: bool,
}

impl TickerReport {
    pub fn source(&self) -> Option<Source> {
        self.fetch.source
    }

    pub fn is_available(&self) -> bool {
        self.fetch.is_available()
    }

    /// Candle-chart data; RSI warm-up draws on the full history.
    pub fn chart_panel(&self, display: usize, rsi_period: usize) -> ChartPanel {
        chart_panel(&self.fetch.full, display, rsi_period)
    }

    /// Line-chart data from the full history.
    pub fn trend_panel(&self, days: usize) -> TrendPanel {
        trend_panel(&self.fetch.full, days)
    }
}

/// Resolver, reconciler source and configuration for a run.
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    resolver: PriceResolver,
    reconcile_fetcher: Box<dyn SourceFetcher>,
}

impl Pipeline {
    pub fn new(
        config: Arc<PipelineConfig>,
        resolver: PriceResolver,
        reconcile_fetcher: Box<dyn SourceFetcher>,
    ) -> Self {
        Self {
            config,
            resolver,
            reconcile_fetcher,
        }
    }

    /// Pipeline over the real sources named in `config`.
    pub fn from_config(config: Arc<PipelineConfig>, http: Arc<dyn HttpFetch>) -> Self {
        let resolver = PriceResolver::from_config(config.clone(), http.clone());
        let reconcile_fetcher = build_fetcher(config.reconcile_source, http, config.clone());
        Self::new(config, resolver, reconcile_fetcher)
    }

    /// Build the report for one ticker. Never fails: an unavailable ticker
    /// yields empty series and an all-undefined snapshot.
    pub fn report(&self, ticker: &str) -> TickerReport {
        let fetch = self.resolver.resolve(ticker, self.config.history_days());

        let series = match fetch.source {
            // merging a source into itself adds nothing
            Some(source) if source != self.reconcile_fetcher.source() => {
                Reconciler::new(self.reconcile_fetcher.as_ref(), self.config.reconcile_threshold)
                    .reconcile(fetch.full.clone(), ticker)
            }
            _ => fetch.full.clone(),
        };

        let reconciled = series.len() != fetch.full.len();
        let indicators = IndicatorSnapshot::compute(&series);

        TickerReport {
            ticker: ticker.to_string(),
            fetch,
            series,
            indicators,
            reconciled,
        }
    }

    /// Reports for every configured ticker, in configured order.
    pub fn report_all(&self) -> Vec<TickerReport> {
        self.config
            .ticker_names()
            .into_iter()
            .map(|ticker| self.report(ticker))
            .collect()
    }
}
