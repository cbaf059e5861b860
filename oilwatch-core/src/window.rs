//! Display windows with indicator warm-up.
//!
//! To show `display` rows with an indicator that needs `warmup` prior
//! observations, the indicator is computed over the trailing
//! `display + warmup` rows and its output is trimmed back to the last
//! `display` entries, so value `i` belongs to displayed row `i`. With less
//! history the buffer simply shrinks and the early displayed values stay
//! undefined.

use crate::domain::{Observation, PriceSeries};
use crate::indicators::{Indicator, Rsi, Sma};
use serde::Serialize;

/// Chooses the buffer and display slices for windowed indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSelector {
    display: usize,
    warmup: usize,
}

impl WindowSelector {
    pub fn new(display: usize, warmup: usize) -> Self {
        Self { display, warmup }
    }

    /// Warm-up sized for the most demanding of `indicators`.
    pub fn for_indicators(display: usize, indicators: &[&dyn Indicator]) -> Self {
        let warmup = indicators.iter().map(|i| i.lookback()).max().unwrap_or(0);
        Self::new(display, warmup)
    }

    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Rows fed to the indicator: `display + warmup`.
    pub fn buffer_len(&self) -> usize {
        self.display + self.warmup
    }

    /// Trailing rows shown to the reader.
    pub fn display(&self, series: &PriceSeries) -> PriceSeries {
        series.tail(self.display)
    }

    /// Indicator values aligned one-to-one with [`display`](Self::display).
    pub fn aligned(&self, series: &PriceSeries, indicator: &dyn Indicator) -> Vec<Option<f64>> {
        let buffer = series.tail(self.buffer_len()).closes();
        let values = indicator.compute(&buffer);
        let shown = self.display.min(values.len());
        values[values.len() - shown..].to_vec()
    }

    pub fn select(&self, series: &PriceSeries, indicator: &dyn Indicator) -> IndicatorWindow {
        IndicatorWindow {
            name: indicator.name().to_string(),
            observations: self.display(series).into_observations(),
            values: self.aligned(series, indicator),
        }
    }
}

/// Display rows plus one indicator value per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorWindow {
    pub name: String,
    pub observations: Vec<Observation>,
    pub values: Vec<Option<f64>>,
}

impl IndicatorWindow {
    /// True if at least one displayed row has a value.
    pub fn has_values(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

/// Candle-chart data: trailing OHLC rows with aligned RSI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub observations: Vec<Observation>,
    pub rsi: Vec<Option<f64>>,
}

/// Line-chart data: trailing closes with aligned SMA 20 and SMA 50.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPanel {
    pub observations: Vec<Observation>,
    pub sma_20: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
}

/// Last `display` rows with RSI(`rsi_period`) warmed up on earlier history.
pub fn chart_panel(series: &PriceSeries, display: usize, rsi_period: usize) -> ChartPanel {
    let rsi = Rsi::new(rsi_period);
    let window = WindowSelector::for_indicators(display, &[&rsi]).select(series, &rsi);
    ChartPanel {
        observations: window.observations,
        rsi: window.values,
    }
}

/// Last `days` rows with SMA 20/50 warmed up on earlier history.
pub fn trend_panel(series: &PriceSeries, days: usize) -> TrendPanel {
    let sma_20 = Sma::new(20);
    let sma_50 = Sma::new(50);
    let selector = WindowSelector::for_indicators(days, &[&sma_20, &sma_50]);
    TrendPanel {
        observations: selector.display(series).into_observations(),
        sma_20: selector.aligned(series, &sma_20),
        sma_50: selector.aligned(series, &sma_50),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::rsi;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::from_unordered(
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| Observation::close_only(base + chrono::Duration::days(i as i64), c))
                .collect(),
        )
    }

    fn zigzag(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 70.0 + (i % 5) as f64 - (i % 3) as f64 * 0.7)
            .collect()
    }

    #[test]
    fn buffer_is_display_plus_warmup() {
        let rsi = Rsi::new(14);
        let selector = WindowSelector::for_indicators(14, &[&rsi]);
        assert_eq!(selector.warmup(), 14);
        assert_eq!(selector.buffer_len(), 28);
    }

    #[test]
    fn warmup_uses_max_lookback() {
        let selector = WindowSelector::for_indicators(60, &[&Sma::new(20), &Sma::new(50)]);
        assert_eq!(selector.warmup(), 49);
        assert_eq!(WindowSelector::for_indicators(5, &[]).warmup(), 0);
    }

    #[test]
    fn aligned_values_match_full_history_computation() {
        let closes = zigzag(60);
        let s = series(&closes);
        let panel = chart_panel(&s, 14, 14);

        assert_eq!(panel.observations.len(), 14);
        assert_eq!(panel.rsi.len(), 14);
        for (i, obs) in panel.observations.iter().enumerate() {
            let upto = closes.len() - 14 + i;
            assert_eq!(obs.close, closes[upto]);
            assert_eq!(panel.rsi[i], rsi(&closes[..=upto], 14), "row {i}");
        }
        assert!(panel.rsi.iter().all(Option::is_some));
    }

    #[test]
    fn short_history_leaves_early_rows_undefined() {
        // 20 rows: buffer shrinks to 20, first RSI needs 15 closes
        let closes = zigzag(20);
        let panel = chart_panel(&series(&closes), 14, 14);

        assert_eq!(panel.rsi.len(), 14);
        // displayed rows are indices 6..20; RSI defined from index 14
        assert!(panel.rsi[..8].iter().all(Option::is_none));
        assert!(panel.rsi[8..].iter().all(Option::is_some));
    }

    #[test]
    fn fewer_rows_than_display() {
        let panel = chart_panel(&series(&[70.0, 71.0, 72.0]), 14, 14);
        assert_eq!(panel.observations.len(), 3);
        assert_eq!(panel.rsi, vec![None, None, None]);
    }

    #[test]
    fn empty_series_gives_empty_window() {
        let panel = chart_panel(&PriceSeries::empty(), 14, 14);
        assert!(panel.observations.is_empty());
        assert!(panel.rsi.is_empty());
    }

    #[test]
    fn trend_panel_warms_sma_50() {
        let closes: Vec<f64> = (0..120).map(|i| 60.0 + i as f64 * 0.1).collect();
        let panel = trend_panel(&series(&closes), 60);

        assert_eq!(panel.observations.len(), 60);
        assert!(panel.sma_20.iter().all(Option::is_some));
        assert!(panel.sma_50.iter().all(Option::is_some));
    }

    #[test]
    fn select_names_the_indicator() {
        let window = WindowSelector::new(3, 2).select(&series(&zigzag(10)), &Sma::new(3));
        assert_eq!(window.name, "sma_3");
        assert_eq!(window.values.len(), 3);
        assert!(window.has_values());
    }
}
