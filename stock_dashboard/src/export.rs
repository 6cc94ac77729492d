//! Writes an [`IndicatorFrame`] for external charting.
//!
//! JSON is always available. Feather (Arrow IPC) needs the `feather` feature.
//! A directory target gets a generated `SYMBOL_TIMESTAMP_UUID.json` name.

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use chrono::Utc;
use signal_engine::frame::IndicatorFrame;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "feather")]
    #[error("failed to write Feather file: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("'.{0}' export needs the `feather` feature")]
    FeatherDisabled(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Feather,
}

impl ExportFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("feather" | "arrow" | "ipc") => ExportFormat::Feather,
            _ => ExportFormat::Json,
        }
    }
}

/// Resolves `target` to a file path. Existing directories get a fresh file name.
pub fn output_path(target: &Path, symbol: &str) -> PathBuf {
    if target.is_dir() {
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        target.join(format!("{symbol}_{stamp}_{}.json", Uuid::new_v4()))
    } else {
        target.to_path_buf()
    }
}

/// Writes `frame` to `target` and returns the path actually written.
pub fn export_frame(frame: &IndicatorFrame, target: &Path) -> Result<PathBuf, ExportError> {
    let path = output_path(target, &frame.symbol);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match ExportFormat::from_path(&path) {
        ExportFormat::Json => write_json(frame, &path)?,
        ExportFormat::Feather => write_feather(frame, &path)?,
    }
    info!(path = %path.display(), rows = frame.len(), "exported indicator frame");
    Ok(path)
}

fn write_json(frame: &IndicatorFrame, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), frame)?;
    Ok(())
}

#[cfg(feature = "feather")]
fn write_feather(frame: &IndicatorFrame, path: &Path) -> Result<(), ExportError> {
    use polars::prelude::*;
    use polars_io::{SerWriter, ipc::IpcWriter};

    let mut columns: Vec<Column> = Vec::with_capacity(frame.columns().len() + 1);
    let millis: Vec<i64> = frame.timestamps.iter().map(|t| t.timestamp_millis()).collect();
    columns.push(Column::new("timestamp".into(), millis));
    for (name, values) in frame.columns() {
        columns.push(Column::new(name.into(), values.to_vec()));
    }
    let mut df = DataFrame::new(columns)?;

    let mut file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    IpcWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

#[cfg(not(feature = "feather"))]
fn write_feather(_frame: &IndicatorFrame, path: &Path) -> Result<(), ExportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("feather")
        .to_string();
    Err(ExportError::FeatherDisabled(ext))
}
