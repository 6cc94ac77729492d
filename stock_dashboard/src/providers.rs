//! Maps the configured provider kind to a concrete [`DataProvider`].

use std::num::NonZeroU32;

use market_data_ingestor::providers::{
    DataProvider, InvalidSettingSnafu, ProviderInitError,
    alpaca_rest::provider::AlpacaProvider,
    json_file::JsonFileProvider,
    yahoo_chart::provider::YahooChartProvider,
};

use crate::config::{ProviderConfig, ProviderKind};

pub type BoxedProvider = Box<dyn DataProvider + Send + Sync>;

pub fn build_provider(cfg: &ProviderConfig) -> Result<BoxedProvider, ProviderInitError> {
    match cfg.kind {
        ProviderKind::Yahoo => {
            let Some(rps) = NonZeroU32::new(cfg.requests_per_second) else {
                return InvalidSettingSnafu {
                    message: "provider.requests_per_second must be at least 1",
                }
                .fail();
            };
            let p = match &cfg.base_url {
                Some(url) => YahooChartProvider::with_base_url(url, rps)?,
                None => YahooChartProvider::new(rps)?,
            };
            Ok(Box::new(p))
        }
        ProviderKind::Alpaca => {
            let p = AlpacaProvider::new()?;
            Ok(Box::new(p))
        }
        ProviderKind::JsonFile => Ok(Box::new(JsonFileProvider::new(&cfg.data_dir))),
    }
}
