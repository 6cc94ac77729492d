use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::raw_table::{RawColumn, RawTable};

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Unix seconds. Absent when the symbol has no bars in range.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Parallel arrays; gaps (halts, holidays on intraday) are `null`.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Lays the parallel arrays out as a raw table labelled `[field, symbol]`.
    ///
    /// Out-of-range timestamps fall back to the epoch to keep the columns aligned.
    /// An array the chart left out adds no column, so a missing volume reads as 0
    /// downstream; a short one is padded with nulls.
    pub fn into_raw_table(self) -> RawTable {
        let symbol = self.meta.symbol;
        let timestamps: Vec<DateTime<Utc>> = self
            .timestamp
            .iter()
            .map(|&secs| DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
            .collect();
        let len = timestamps.len();
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        [
            ("Open", quote.open),
            ("High", quote.high),
            ("Low", quote.low),
            ("Close", quote.close),
            ("Volume", quote.volume),
        ]
        .into_iter()
        .filter(|(_, values)| !values.is_empty() || len == 0)
        .fold(RawTable::new(timestamps), |table, (field, mut values)| {
            values.resize(len, None);
            table.with_column(RawColumn::new([field, symbol.as_str()], values))
        })
    }
}
