//! Column-oriented price tables as providers deliver them, before any cleanup.
//!
//! Labels may be nested (`["Close", "AAPL"]`), oddly cased, or repeated, and
//! cells may be numbers, numeric strings, or nulls. [`crate::normalize`] turns
//! a [`RawTable`] into a clean [`BarSeries`](crate::models::bar_series::BarSeries).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single untyped cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Number(f64),
    Text(String),
    Null,
}

impl From<f64> for RawCell {
    fn from(v: f64) -> Self {
        RawCell::Number(v)
    }
}

impl From<Option<f64>> for RawCell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(RawCell::Null, RawCell::Number)
    }
}

impl From<&str> for RawCell {
    fn from(v: &str) -> Self {
        RawCell::Text(v.to_string())
    }
}

/// One labelled column. The label is a path; the first level names the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub label: Vec<String>,
    pub values: Vec<RawCell>,
}

impl RawColumn {
    pub fn new<L, I, C>(label: L, values: I) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<RawCell>,
    {
        Self {
            label: label.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Timestamps plus labelled columns, one value per timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub timestamps: Vec<DateTime<Utc>>,
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: RawColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
