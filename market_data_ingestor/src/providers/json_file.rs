//! Offline provider: one column-oriented [`RawTable`] per symbol on disk.
//!
//! Layout is `<dir>/<SYMBOL>.json` where `SYMBOL` is the provider symbol
//! (`AAPL.json`, `2317.TW.json`). The whole table is returned regardless of
//! the requested period, which keeps fixtures reproducible.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::ResultExt;
use tracing::{info, warn};

use crate::{
    models::{bar_series::BarSeries, raw_table::RawTable, request_params::BarsRequestParams},
    normalize::normalize_table,
    providers::{DataProvider, DecodeSnafu, IoSnafu, NormalizeSnafu, ProviderError},
};

pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.json"))
    }
}

#[async_trait]
impl DataProvider for JsonFileProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        let mut out = Vec::new();
        for symbol in params.provider_symbols() {
            let path = self.path_for(&symbol);
            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(symbol, path = %path.display(), "no data file for symbol");
                    continue;
                }
                Err(e) => {
                    return Err(e).context(IoSnafu {
                        path: path.display().to_string(),
                    });
                }
            };

            let table: RawTable =
                serde_json::from_str(&text).context(DecodeSnafu { symbol: symbol.as_str() })?;
            let series = normalize_table(&symbol, params.timeframe, &table)
                .context(NormalizeSnafu { symbol: symbol.as_str() })?;
            if !series.is_empty() {
                out.push(series);
            }
        }
        info!(dir = %self.dir.display(), returned = out.len(), "loaded bars from disk");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
