use serde::{Deserialize, Serialize};

use crate::{
    models::{market::Market, period::LookbackPeriod, timeframe::TimeFrame},
    providers::alpaca_rest::params::AlpacaBarsParams,
};

/// Universal parameters for requesting time-series bar data from any market data provider.
///
/// This is the Rust shape of `fetch(ticker, interval, period)`: a set of
/// symbols, a bar interval, and how far back to look. It is vendor-agnostic;
/// each [`DataProvider`](crate::providers::DataProvider) translates it into
/// its own query.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// Symbols as the user entered them (e.g. `["AAPL"]`, `["2317"]`).
    ///
    /// Providers pass each through [`Market::provider_symbol`] before querying.
    pub symbols: Vec<String>,

    /// The time interval for each bar (e.g., 1 hour, 1 day).
    ///
    /// **Validation of allowed values is performed by each data provider
    /// implementation, according to their own API rules.**
    pub timeframe: TimeFrame,

    /// How much history to request, ending now.
    pub period: LookbackPeriod,

    /// Which exchange the symbols belong to.
    pub market: Market,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl BarsRequestParams {
    /// Daily bars over `period` for a single symbol.
    pub fn daily(symbol: impl Into<String>, market: Market, period: LookbackPeriod) -> Self {
        Self {
            symbols: vec![symbol.into()],
            timeframe: TimeFrame::day(),
            period,
            market,
            provider_specific: ProviderParams::None,
        }
    }

    /// Symbols mapped for the provider (`2317` -> `2317.TW`).
    pub fn provider_symbols(&self) -> Vec<String> {
        self.symbols
            .iter()
            .map(|s| self.market.provider_symbol(s))
            .collect()
    }
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
}
