//! Provider-table normalizer.
//!
//! Turns a [`RawTable`] with whatever labels and cell types a vendor produced
//! into a [`BarSeries`] with the fixed internal schema
//! `{open, high, low, close, volume}`:
//!
//! - Labels are resolved on their first level, trimmed and case-folded; the
//!   first column claiming a field wins, later duplicates are ignored.
//! - Cells are coerced to `f64`. Numeric strings (with thousands separators)
//!   parse; nulls, NaN and junk become missing.
//! - Rows missing any of open/high/low/close are dropped; missing volume is 0.
//! - Rows are sorted by timestamp, and for a repeated timestamp the last row wins.
//! - Bars whose high/low do not cover open/close are widened.
//!
//! No indicator math runs before this step.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    bar::Bar,
    bar_series::BarSeries,
    raw_table::{RawCell, RawColumn, RawTable},
    timeframe::TimeFrame,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("required column '{0}' not found")]
    MissingColumn(&'static str),

    #[error("column '{label}' has {actual} values, expected {expected}")]
    Ragged {
        label: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Field {
    fn from_label(label: &[String]) -> Option<Self> {
        let head = label.first()?.trim().to_lowercase();
        match head.as_str() {
            "open" | "o" => Some(Field::Open),
            "high" | "h" => Some(Field::High),
            "low" | "l" => Some(Field::Low),
            "close" | "c" => Some(Field::Close),
            "volume" | "vol" | "v" => Some(Field::Volume),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
            Field::Volume => "volume",
        }
    }
}

/// Coerces one cell to a finite number.
pub fn coerce_cell(cell: &RawCell) -> Option<f64> {
    let v = match cell {
        RawCell::Number(n) => *n,
        RawCell::Text(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
            cleaned.parse::<f64>().ok()?
        }
        RawCell::Null => return None,
    };
    v.is_finite().then_some(v)
}

fn resolve_columns(table: &RawTable) -> Result<IndexMap<Field, &RawColumn>, NormalizeError> {
    let expected = table.timestamps.len();
    let mut resolved: IndexMap<Field, &RawColumn> = IndexMap::new();

    for column in &table.columns {
        let Some(field) = Field::from_label(&column.label) else {
            continue;
        };
        if resolved.contains_key(&field) {
            debug!(label = ?column.label, "ignoring duplicate column");
            continue;
        }
        if column.values.len() != expected {
            return Err(NormalizeError::Ragged {
                label: column.label.join("/"),
                expected,
                actual: column.values.len(),
            });
        }
        resolved.insert(field, column);
    }

    for required in [Field::Open, Field::High, Field::Low, Field::Close] {
        if !resolved.contains_key(&required) {
            return Err(NormalizeError::MissingColumn(required.name()));
        }
    }
    Ok(resolved)
}

/// Normalizes a raw provider table into a clean [`BarSeries`].
pub fn normalize_table(
    symbol: &str,
    timeframe: TimeFrame,
    table: &RawTable,
) -> Result<BarSeries, NormalizeError> {
    let columns = resolve_columns(table)?;
    let value = |field: Field, row: usize| columns.get(&field).and_then(|c| coerce_cell(&c.values[row]));

    let mut bars = Vec::with_capacity(table.timestamps.len());
    let mut dropped = 0usize;
    for (row, ts) in table.timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value(Field::Open, row),
            value(Field::High, row),
            value(Field::Low, row),
            value(Field::Close, row),
        ) else {
            dropped += 1;
            continue;
        };
        let volume = value(Field::Volume, row).unwrap_or(0.0).max(0.0);
        bars.push(Bar::new(*ts, open, high, low, close, volume));
    }
    if dropped > 0 {
        debug!(symbol, dropped, "dropped rows with missing prices");
    }

    Ok(BarSeries::new(symbol, timeframe, sanitize_bars(bars)))
}

/// Sorts by timestamp, keeps the last bar for a repeated timestamp, and
/// repairs high/low envelopes. Bars with non-finite prices are dropped.
pub fn sanitize_bars(bars: Vec<Bar>) -> Vec<Bar> {
    let mut by_time: IndexMap<DateTime<Utc>, Bar> = IndexMap::with_capacity(bars.len());
    for bar in bars {
        let finite = [bar.open, bar.high, bar.low, bar.close]
            .iter()
            .all(|p| p.is_finite());
        if finite {
            by_time.insert(bar.timestamp, bar);
        }
    }
    by_time.sort_keys();

    let mut repaired = 0usize;
    let out: Vec<Bar> = by_time
        .into_values()
        .map(|mut bar| {
            if !bar.volume.is_finite() {
                bar.volume = 0.0;
            }
            if bar.repair_envelope() {
                repaired += 1;
            }
            bar
        })
        .collect();
    if repaired > 0 {
        debug!(repaired, "widened bars whose high/low did not cover open/close");
    }
    out
}
