//! Series normalization: raw CSV responses to canonical `PriceSeries`.
//!
//! Column names differ per source and are matched case-insensitively.
//! Rows whose date or close does not parse are dropped; the result is
//! sorted ascending with one row per date (last occurrence wins).

use super::provider::DataError;
use crate::domain::{Observation, PriceSeries};
use chrono::NaiveDate;

/// Header plus string cells of a CSV response.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse CSV text with a header row. Short rows are tolerated.
    pub fn parse(text: &str) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| DataError::Format(format!("unreadable CSV header: {e}")))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::Format(format!("unreadable CSV row: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column named `name`, ignoring case.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    fn require(&self, name: &str) -> Result<usize, DataError> {
        self.column(name).ok_or_else(|| self.missing(name))
    }

    fn missing(&self, what: &str) -> DataError {
        DataError::Format(format!(
            "missing column '{what}' (header: {})",
            self.headers.join(",")
        ))
    }

    fn cell(row: &[String], idx: usize) -> Option<&str> {
        row.get(idx).map(String::as_str)
    }
}

/// Parse a calendar date. Accepts `YYYY-MM-DD`, `YYYYMMDD`, and a
/// `YYYY-MM-DD HH:MM:SS` timestamp (time discarded).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[..4].parse().ok()?;
        let month = s[4..6].parse().ok()?;
        let day = s[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    s.get(..10)
        .filter(|_| s.len() > 10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parse a finite number; placeholders such as `N/D` or `.` yield `None`.
pub fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize a full-OHLC table (Stooq layout: Date, Open, High, Low, Close).
///
/// Open/high/low that fail to parse become `None`; the row is kept as long
/// as date and close are valid.
pub fn normalize_ohlc(table: &RawTable) -> Result<PriceSeries, DataError> {
    let date_col = table.require("date")?;
    let open_col = table.require("open")?;
    let high_col = table.require("high")?;
    let low_col = table.require("low")?;
    let close_col = table.require("close")?;

    let observations = table
        .rows
        .iter()
        .filter_map(|row| {
            let price = |idx| RawTable::cell(row, idx).and_then(parse_price);
            Some(Observation {
                date: RawTable::cell(row, date_col).and_then(parse_date)?,
                open: price(open_col),
                high: price(high_col),
                low: price(low_col),
                close: price(close_col)?,
            })
        })
        .collect();

    Ok(PriceSeries::from_unordered(observations))
}

/// Normalize a single-value table (FRED layout) and synthesize pseudo-OHLC.
///
/// The date column is `date` or `observation_date`; the value column is
/// `value` or the series id itself. Synthesized rows use
/// `open = previous close` (own close for the first row),
/// `high = max(open, close)`, `low = min(open, close)`. These exist only so
/// downstream code sees a uniform schema; they are not an intraday range.
pub fn normalize_close_only(table: &RawTable, series_id: &str) -> Result<PriceSeries, DataError> {
    let date_col = table
        .column("date")
        .or_else(|| table.column("observation_date"))
        .ok_or_else(|| table.missing("date/observation_date"))?;
    let value_col = table
        .column("value")
        .or_else(|| table.column(series_id))
        .ok_or_else(|| table.missing(&format!("value/{series_id}")))?;

    let closes = PriceSeries::from_unordered(
        table
            .rows
            .iter()
            .filter_map(|row| {
                let date = RawTable::cell(row, date_col).and_then(parse_date)?;
                let close = RawTable::cell(row, value_col).and_then(parse_price)?;
                Some(Observation::close_only(date, close))
            })
            .collect(),
    );

    Ok(with_pseudo_ohlc(closes))
}

/// Fill open/high/low of an ascending close-only series from its closes.
pub fn with_pseudo_ohlc(series: PriceSeries) -> PriceSeries {
    let mut prev_close: Option<f64> = None;
    let observations = series
        .into_observations()
        .into_iter()
        .map(|obs| {
            let open = prev_close.unwrap_or(obs.close);
            prev_close = Some(obs.close);
            Observation::new(
                obs.date,
                open,
                open.max(obs.close),
                open.min(obs.close),
                obs.close,
            )
        })
        .collect();
    PriceSeries::from_unordered(observations)
}
