use async_trait::async_trait;
use chrono::DateTime;
use indexmap::IndexMap;
use reqwest::{Client, header};
use shared_utils::math::round_to;
use snafu::ResultExt;

use crate::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, ProviderError, ProviderInitError, ReqwestSnafu,
        yahoo_rest::{
            params::{construct_params, validate_range},
            response::{ChartResponse, ChartResult, Quote},
        },
    },
};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// The endpoint rejects requests without a browser-like user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Provider for Yahoo Finance's unauthenticated v8 chart endpoint.
pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    /// Creates a new Yahoo provider with a preconfigured HTTP client.
    ///
    /// The endpoint needs no API keys; only a user agent header is set.
    pub fn new() -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        validate_range(&params)?;

        // Accumulate per symbol in request order; a symbol listed twice is
        // fetched twice but merged into one series.
        let mut all_bars: IndexMap<String, Vec<Bar>> = IndexMap::new();

        for symbol in &params.symbols {
            let url = format!("{BASE_URL}/{symbol}");
            let query = construct_params(&params);

            let response = self
                .client
                .get(&url)
                .query(&query)
                .send()
                .await
                .context(ReqwestSnafu)?;

            if !response.status().is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu { message }.fail();
            }

            let chart = response
                .json::<ChartResponse>()
                .await
                .context(ReqwestSnafu)?
                .chart;

            if let Some(error) = chart.error {
                return ApiSnafu {
                    message: format!("{}: {}", error.code, error.description),
                }
                .fail();
            }

            let bars = chart
                .result
                .unwrap_or_default()
                .into_iter()
                .flat_map(|result| bars_from_result(result, params.rounding))
                .collect::<Vec<_>>();

            all_bars.entry(symbol.clone()).or_default().extend(bars);
        }

        let result = all_bars
            .into_iter()
            .map(|(symbol, bars)| BarSeries { symbol, bars })
            .collect();

        Ok(result)
    }
}

/// Converts one chart result block into daily bars.
///
/// Slots where any OHLCV component is `null` are dropped; the exchange had no
/// usable quote for that session. Timestamps are truncated to calendar days.
fn bars_from_result(result: ChartResult, rounding: bool) -> Vec<Bar> {
    let quote: Quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let round = |price: f64| if rounding { round_to(price, 2) } else { price };

    result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            Some(Bar {
                date,
                open: round(*quote.open.get(i)?.as_ref()?),
                high: round(*quote.high.get(i)?.as_ref()?),
                low: round(*quote.low.get(i)?.as_ref()?),
                close: round(*quote.close.get(i)?.as_ref()?),
                volume: *quote.volume.get(i)?.as_ref()?,
            })
        })
        .collect()
}
