//! Plain-text rendering of reports and windows.

use oilwatch_core::window::{ChartPanel, TrendPanel};
use oilwatch_core::TickerReport;

/// Signed percentage with two decimals, or `n/a`.
pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.2}%"),
        None => "n/a".into(),
    }
}

/// Price with two decimals and unit, or `n/a`.
pub fn fmt_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2} USD"),
        None => "n/a".into(),
    }
}

/// Bare two-decimal number, or `n/a`.
pub fn fmt_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".into(),
    }
}

fn provenance(report: &TickerReport) -> String {
    match report.source() {
        Some(source) if report.reconciled => format!("{source}, gaps filled"),
        Some(source) => source.to_string(),
        None => "n/a".into(),
    }
}

/// Summary block for one ticker.
pub fn render_report(report: &TickerReport) -> String {
    let mut lines = vec![format!(
        "{} (source: {})",
        report.ticker.to_uppercase(),
        provenance(report)
    )];

    if !report.is_available() {
        lines.push("  data unavailable".into());
        return join_lines(lines);
    }

    let ind = &report.indicators;
    lines.push(format!("  Price:   {}", fmt_price(ind.last_close)));
    lines.push(format!(
        "  1d: {}  |  7d: {}  |  30d: {}",
        fmt_pct(ind.pct_change_1),
        fmt_pct(ind.pct_change_7),
        fmt_pct(ind.pct_change_30)
    ));
    lines.push(format!(
        "  SMA 20: {} | 50: {} | 200: {}",
        fmt_price(ind.sma_20),
        fmt_price(ind.sma_50),
        fmt_price(ind.sma_200)
    ));
    lines.push(format!("  RSI(14): {}", fmt_num(ind.rsi_14)));
    join_lines(lines)
}

/// Candle rows with their aligned RSI.
pub fn render_chart(panel: &ChartPanel) -> String {
    let mut lines = vec![
        format!(
            "{:<12} {:>9} {:>9} {:>9} {:>9} {:>8}",
            "Date", "Open", "High", "Low", "Close", "RSI"
        ),
        "-".repeat(61),
    ];
    for (obs, rsi) in panel.observations.iter().zip(&panel.rsi) {
        lines.push(format!(
            "{:<12} {:>9} {:>9} {:>9} {:>9} {:>8}",
            obs.date.to_string(),
            fmt_num(obs.open),
            fmt_num(obs.high),
            fmt_num(obs.low),
            fmt_num(Some(obs.close)),
            fmt_num(*rsi)
        ));
    }
    join_lines(lines)
}

/// Close line with SMA 20/50 overlays.
pub fn render_trend(panel: &TrendPanel) -> String {
    let mut lines = vec![
        format!("{:<12} {:>9} {:>9} {:>9}", "Date", "Close", "SMA20", "SMA50"),
        "-".repeat(42),
    ];
    for ((obs, s20), s50) in panel
        .observations
        .iter()
        .zip(&panel.sma_20)
        .zip(&panel.sma_50)
    {
        lines.push(format!(
            "{:<12} {:>9} {:>9} {:>9}",
            obs.date.to_string(),
            fmt_num(Some(obs.close)),
            fmt_num(*s20),
            fmt_num(*s50)
        ));
    }
    join_lines(lines)
}

/// Newline-terminated block.
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
