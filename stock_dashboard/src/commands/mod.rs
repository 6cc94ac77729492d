pub mod analyze;
pub mod scan;

use market_data_ingestor::{
    models::{bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{DataProvider, ProviderError},
};
use signal_engine::AnalysisRequest;
use tracing::debug;

use crate::config::AppConfig;

/// What every command runs against.
pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub provider: &'a (dyn DataProvider + Send + Sync),
}

/// Fetches the daily history a request needs. `Ok(None)` when the provider
/// knows nothing about the ticker.
pub async fn fetch_series(
    provider: &(dyn DataProvider + Send + Sync),
    request: &AnalysisRequest,
) -> Result<Option<BarSeries>, ProviderError> {
    let params =
        BarsRequestParams::daily(&request.ticker, request.market, request.horizon.lookback());
    let series = provider.fetch_bars(params).await?.into_iter().next();
    debug!(
        provider = provider.name(),
        symbol = %request.symbol(),
        bars = series.as_ref().map_or(0, BarSeries::len),
        "fetched history"
    );
    Ok(series)
}
