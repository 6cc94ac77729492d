//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, which serves as a unified interface
//! for fetching time-series bar data from any market data vendor.
//!
//! Concrete providers:
//! - [`yahoo_chart::YahooChartProvider`]: keyless chart endpoint, daily history for US and Taiwan listings.
//! - [`alpaca_rest::provider::AlpacaProvider`]: keyed Alpaca REST bars, US equities only.
//! - [`json_file::JsonFileProvider`]: offline tables on disk, one file per symbol.
//!
//! The trait is designed for async usage and supports dynamic dispatch (`dyn DataProvider`)
//! for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{
//!     bar_series::BarSeries,
//!     request_params::BarsRequestParams,
//! };
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(
//!         &self,
//!         _params: BarsRequestParams,
//!     ) -> Result<Vec<BarSeries>, ProviderError> {
//!         Ok(vec![])
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "my-provider"
//!     }
//! }
//! ```

pub mod alpaca_rest;
pub mod json_file;
pub mod yahoo_chart;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{bar_series::BarSeries, request_params::BarsRequestParams};
use crate::normalize::NormalizeError;

/// Trait for fetching time-series bar data from a market data provider.
#[async_trait]
pub trait DataProvider {
    /// Fetches time-series bar data for the given request parameters.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BarSeries>)` - One series per symbol that had data. Unknown
    ///   symbols are left out rather than reported as errors, so an invalid
    ///   ticker shows up as an empty vector.
    /// * `Err(ProviderError)` - Transport, API or decoding failures.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// A provider setting is out of range (e.g. a zero request rate).
    #[snafu(display("Invalid provider setting: {message}"))]
    InvalidSetting {
        message: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., invalid API key).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// Reading local data failed.
    #[snafu(display("Failed to read {path}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A payload could not be decoded.
    #[snafu(display("Failed to decode data for {symbol}: {source}"))]
    Decode {
        symbol: String,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The vendor table could not be mapped onto OHLCV bars.
    #[snafu(display("Malformed table for {symbol}: {source}"))]
    Normalize {
        symbol: String,
        source: NormalizeError,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::models::{market::Market, period::LookbackPeriod};

    use super::*;

    struct EmptyProvider;
    struct EchoProvider;

    #[async_trait]
    impl DataProvider for EmptyProvider {
        async fn fetch_bars(&self, _params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
            Ok(vec![])
        }

        fn name(&self) -> &'static str {
            "empty"
        }
    }

    #[async_trait]
    impl DataProvider for EchoProvider {
        async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
            Ok(params
                .provider_symbols()
                .into_iter()
                .map(|s| BarSeries::new(s, params.timeframe, vec![]))
                .collect())
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    // Decides AT RUNTIME which provider to give back.
    fn get_provider(name: &str) -> Box<dyn DataProvider + Send + Sync> {
        if name == "echo" {
            Box::new(EchoProvider)
        } else {
            Box::new(EmptyProvider)
        }
    }

    #[tokio::test]
    async fn test_dynamic_provider() {
        let params = BarsRequestParams::daily("2317", Market::TaiwanEquity, LookbackPeriod::OneYear);

        let echo = get_provider("echo");
        let series = echo.fetch_bars(params.clone()).await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].symbol, "2317.TW");

        let empty = get_provider("other");
        assert_eq!(empty.name(), "empty");
        assert!(empty.fetch_bars(params).await.unwrap().is_empty());
    }
}
