//! OilWatch CLI — daily oil price report with source fallback.
//!
//! Commands:
//! - `report` — last price, percent changes, SMAs and RSI per ticker
//! - `window` — chart window for one ticker with aligned RSI and SMA trend
//! - `config` — print the effective configuration as TOML

mod format;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use oilwatch_core::data::BlockingHttp;
use oilwatch_core::{Pipeline, PipelineConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "oilwatch",
    about = "OilWatch CLI — WTI/Brent daily prices from Stooq with FRED fallback"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to built-in settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose diagnostics on stderr (overrides RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    diag: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the indicator summary for each ticker.
    Report {
        /// Tickers to report (e.g., WTI BRENT). Defaults to all configured.
        tickers: Vec<String>,

        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the chart window for one ticker.
    Window {
        /// Ticker to show.
        ticker: String,

        /// Rows in the candle window. Defaults to display_days.
        #[arg(long)]
        days: Option<usize>,

        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.diag);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Report { tickers, json } => run_report(config, tickers, json),
        Commands::Window { ticker, days, json } => run_window(config, &ticker, days, json),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn init_tracing(diag: bool) {
    let filter = if diag {
        EnvFilter::new("oilwatch=debug,oilwatch_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "oilwatch=info,oilwatch_core=info".into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn build_pipeline(config: PipelineConfig) -> Result<Pipeline> {
    let http = BlockingHttp::new(&config.http).context("building HTTP client")?;
    tracing::debug!(
        sources = ?config.source_order,
        reconcile = %config.reconcile_source,
        tickers = config.tickers.len(),
        "pipeline configured"
    );
    Ok(Pipeline::from_config(Arc::new(config), Arc::new(http)))
}

fn run_report(config: PipelineConfig, tickers: Vec<String>, json: bool) -> Result<()> {
    for ticker in &tickers {
        if config.ticker(ticker).is_none() {
            bail!(
                "unknown ticker '{ticker}'. Configured: {}",
                config.ticker_names().join(", ")
            );
        }
    }

    let pipeline = build_pipeline(config)?;
    let reports = if tickers.is_empty() {
        pipeline.report_all()
    } else {
        tickers.iter().map(|t| pipeline.report(t)).collect()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", format::render_report(report));
    }
    Ok(())
}

fn run_window(
    mut config: PipelineConfig,
    ticker: &str,
    days: Option<usize>,
    json: bool,
) -> Result<()> {
    if config.ticker(ticker).is_none() {
        bail!(
            "unknown ticker '{ticker}'. Configured: {}",
            config.ticker_names().join(", ")
        );
    }
    if let Some(days) = days {
        if days == 0 {
            bail!("--days must be >= 1");
        }
        config.display_days = days;
    }

    let display = config.display_days;
    let rsi_period = config.rsi_period;
    let trend_days = config.history_days();

    let pipeline = build_pipeline(config)?;
    let report = pipeline.report(ticker);
    if !report.is_available() {
        bail!("{}: data unavailable", ticker.to_uppercase());
    }

    let chart = report.chart_panel(display, rsi_period);
    let trend = report.trend_panel(trend_days);

    if json {
        let out = serde_json::json!({
            "ticker": report.ticker,
            "source": report.source(),
            "chart": chart,
            "trend": trend,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "=== {} (source: {}) ===",
        report.ticker.to_uppercase(),
        report
            .source()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "n/a".into())
    );
    println!();
    println!("--- Last {} sessions ---", chart.observations.len());
    print!("{}", format::render_chart(&chart));
    println!();
    println!("--- Trend ({} sessions) ---", trend.observations.len());
    print!("{}", format::render_trend(&trend));
    Ok(())
}
