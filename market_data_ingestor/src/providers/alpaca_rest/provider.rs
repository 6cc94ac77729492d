use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    models::{bar::Bar, bar_series::BarSeries, market::Market, request_params::BarsRequestParams},
    normalize::sanitize_bars,
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidApiKeySnafu, MissingEnvVarSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu, ValidationSnafu,
        alpaca_rest::{
            params::{construct_params, validate_timeframe},
            response::{AlpacaBar, AlpacaResponse},
        },
    },
};

const BASE_URL: &str = "https://data.alpaca.markets/v2/stocks/bars";

pub struct AlpacaProvider {
    client: Client,
    base_url: String,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = SecretString::from(get_env_var("APCA_API_KEY_ID").context(MissingEnvVarSnafu)?);
        let secret_key =
            SecretString::from(get_env_var("APCA_API_SECRET_KEY").context(MissingEnvVarSnafu)?);
        Self::with_keys(api_key, secret_key, BASE_URL)
    }

    /// Creates a provider with explicit credentials and endpoint.
    pub fn with_keys(
        api_key: SecretString,
        secret_key: SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        let mut key_value =
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?;
        key_value.set_sensitive(true);
        headers.insert("APCA-API-KEY-ID", key_value);
        let mut secret_value =
            header::HeaderValue::from_str(secret_key.expose_secret()).context(InvalidApiKeySnafu)?;
        secret_value.set_sensitive(true);
        headers.insert("APCA-API-SECRET-KEY", secret_value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        validate_timeframe(&params.timeframe)?;
        if params.market != Market::UsEquity {
            return ValidationSnafu {
                message: format!("Alpaca only serves US equities, not market '{}'", params.market),
            }
            .fail();
        }

        let end = Utc::now();
        let base_query = construct_params(&params, end);
        let mut all_bars: IndexMap<String, Vec<AlpacaBar>> = IndexMap::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut query_params = base_query.clone();
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self
                .client
                .get(&self.base_url)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    message: format!("{status}: {body}"),
                }
                .fail();
            }

            let page = response.json::<AlpacaResponse>().await.context(ReqwestSnafu)?;
            pages += 1;

            // Merge the bars from the current page into our collection.
            for (symbol, bars) in page.bars.unwrap_or_default() {
                all_bars.entry(symbol).or_default().extend(bars);
            }

            match page.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }
        debug!(pages, symbols = all_bars.len(), "alpaca pagination finished");

        let result: Vec<BarSeries> = all_bars
            .into_iter()
            .map(|(symbol, alpaca_bars)| {
                let bars: Vec<Bar> = alpaca_bars.into_iter().map(Bar::from).collect();
                BarSeries::new(symbol, params.timeframe, sanitize_bars(bars))
            })
            .collect();

        info!(
            series = result.len(),
            bars = result.iter().map(BarSeries::len).sum::<usize>(),
            "fetched bars from alpaca"
        );
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "alpaca"
    }
}
