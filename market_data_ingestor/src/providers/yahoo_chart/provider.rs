use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, StatusCode};
use snafu::ResultExt;
use tracing::{debug, info, warn};

use crate::{
    models::{
        bar_series::BarSeries,
        request_params::BarsRequestParams,
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    normalize::normalize_table,
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, NormalizeSnafu, ProviderError,
        ProviderInitError, ReqwestSnafu, ValidationSnafu,
        yahoo_chart::response::ChartEnvelope,
    },
};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Default pacing when the caller does not configure one.
pub fn default_requests_per_second() -> NonZeroU32 {
    nonzero!(2u32)
}

pub struct YahooChartProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    pub fn new(requests_per_second: NonZeroU32) -> Result<Self, ProviderInitError> {
        Self::with_base_url(BASE_URL, requests_per_second)
    }

    /// Points the provider at another host (a mirror, or a local stub in tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        requests_per_second: NonZeroU32,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter: RateLimiter::direct(Quota::per_second(requests_per_second)),
        })
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        params: &BarsRequestParams,
    ) -> Result<Option<BarSeries>, ProviderError> {
        self.limiter.until_ready().await;

        let url = format!("{}/{}", self.base_url, symbol);
        let query = [
            ("interval", interval_param(&params.timeframe)),
            ("range", params.period.to_string()),
            ("includePrePost", "false".to_string()),
        ];
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;
        if status == StatusCode::NOT_FOUND {
            warn!(symbol, "symbol not found");
            return Ok(None);
        }
        if !status.is_success() {
            return ApiSnafu {
                message: format!("{status}: {body}"),
            }
            .fail();
        }

        let envelope: ChartEnvelope = serde_json::from_str(&body).context(DecodeSnafu { symbol })?;
        if let Some(err) = envelope.chart.error {
            if err.code.eq_ignore_ascii_case("not found") {
                warn!(symbol, "symbol not found");
                return Ok(None);
            }
            return ApiSnafu {
                message: format!("{}: {}", err.code, err.description.unwrap_or_default()),
            }
            .fail();
        }

        let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(None);
        };

        let table = result.into_raw_table();
        let series =
            normalize_table(symbol, params.timeframe, &table).context(NormalizeSnafu { symbol })?;
        debug!(symbol, rows = table.timestamps.len(), bars = series.len(), "normalized chart");
        Ok((!series.is_empty()).then_some(series))
    }
}

/// Interval combinations the chart endpoint accepts.
pub fn validate_timeframe(tf: &TimeFrame) -> Result<(), ProviderError> {
    let ok = match tf.unit {
        TimeFrameUnit::Minute => [1, 2, 5, 15, 30, 90].contains(&tf.amount),
        TimeFrameUnit::Hour => tf.amount == 1,
        TimeFrameUnit::Day => [1, 5].contains(&tf.amount),
        TimeFrameUnit::Week => tf.amount == 1,
        TimeFrameUnit::Month => [1, 3].contains(&tf.amount),
    };
    if ok {
        Ok(())
    } else {
        ValidationSnafu {
            message: format!("chart endpoint does not support a {tf} interval"),
        }
        .fail()
    }
}

/// `5m`, `1h`, `1d`, `1wk`, `1mo`: the compact notation is what the endpoint takes.
pub fn interval_param(tf: &TimeFrame) -> String {
    tf.to_string()
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        validate_timeframe(&params.timeframe)?;

        let mut out = Vec::with_capacity(params.symbols.len());
        for symbol in params.provider_symbols() {
            if let Some(series) = self.fetch_symbol(&symbol, &params).await? {
                out.push(series);
            }
        }
        info!(
            requested = params.symbols.len(),
            returned = out.len(),
            range = %params.period,
            "fetched chart history"
        );
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "yahoo_chart"
    }
}
