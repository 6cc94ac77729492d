//! The price series with every derived column attached.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use market_data_ingestor::models::bar_series::BarSeries;
use serde::Serialize;

use crate::indicators;

pub const MA_WINDOW: usize = 20;
pub const EMA_SHORT: usize = 8;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_WINDOW: usize = 20;
pub const BOLLINGER_K: f64 = 2.0;
pub const RSI_PERIOD: usize = 14;
pub const RSI_ZERO_LOSS_GUARD: f64 = 0.001;
pub const ATR_WINDOW: usize = 20;

/// Column names in export order.
pub const COLUMN_NAMES: [&str; 18] = [
    "open", "high", "low", "close", "volume", "ma20", "ema8", "ema12", "ema26", "bb_upper",
    "bb_lower", "bandwidth", "rsi", "macd", "signal", "hist", "vwap", "atr",
];

/// Column-oriented indicator table aligned with the input bars.
///
/// Every column has one entry per bar; `None` marks warm-up rows or values
/// that are undefined (a zero-volume VWAP, a zero-price bandwidth).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    pub symbol: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<f64>>,
    pub ma20: Vec<Option<f64>>,
    pub ema8: Vec<Option<f64>>,
    pub ema12: Vec<Option<f64>>,
    pub ema26: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub bandwidth: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub hist: Vec<Option<f64>>,
    pub vwap: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
}

fn dense(values: Vec<f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}

impl IndicatorFrame {
    pub fn compute(series: &BarSeries) -> Self {
        let open = series.opens();
        let high = series.highs();
        let low = series.lows();
        let close = series.closes();
        let volume = series.volumes();

        let bands = indicators::bollinger(&close, BOLLINGER_WINDOW, BOLLINGER_K);
        let macd = indicators::macd(&close, MACD_FAST, MACD_SLOW, MACD_SIGNAL);

        Self {
            symbol: series.symbol.clone(),
            timestamps: series.bars.iter().map(|b| b.timestamp).collect(),
            ma20: indicators::sma(&close, MA_WINDOW),
            ema8: dense(indicators::ema(&close, EMA_SHORT)),
            ema12: dense(indicators::ema(&close, MACD_FAST)),
            ema26: dense(indicators::ema(&close, MACD_SLOW)),
            bb_upper: bands.upper,
            bb_lower: bands.lower,
            bandwidth: bands.bandwidth,
            rsi: indicators::rsi(&close, RSI_PERIOD, RSI_ZERO_LOSS_GUARD),
            macd: dense(macd.macd),
            signal: dense(macd.signal),
            hist: dense(macd.hist),
            vwap: indicators::vwap(&close, &volume),
            atr: indicators::atr(&high, &low, &close, ATR_WINDOW),
            open: dense(open),
            high: dense(high),
            low: dense(low),
            close: dense(close),
            volume: dense(volume),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Looks a column up by its export name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        let col = match name {
            "open" => &self.open,
            "high" => &self.high,
            "low" => &self.low,
            "close" => &self.close,
            "volume" => &self.volume,
            "ma20" => &self.ma20,
            "ema8" => &self.ema8,
            "ema12" => &self.ema12,
            "ema26" => &self.ema26,
            "bb_upper" => &self.bb_upper,
            "bb_lower" => &self.bb_lower,
            "bandwidth" => &self.bandwidth,
            "rsi" => &self.rsi,
            "macd" => &self.macd,
            "signal" => &self.signal,
            "hist" => &self.hist,
            "vwap" => &self.vwap,
            "atr" => &self.atr,
            _ => return None,
        };
        Some(col)
    }

    /// All columns, keyed and ordered as [`COLUMN_NAMES`].
    pub fn columns(&self) -> IndexMap<&'static str, &[Option<f64>]> {
        COLUMN_NAMES
            .iter()
            .filter_map(|name| self.column(name).map(|col| (*name, col)))
            .collect()
    }

    /// Value of `name` on the newest bar.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.column(name)?.last().copied().flatten()
    }
}
