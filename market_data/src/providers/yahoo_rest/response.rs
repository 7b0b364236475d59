use serde::Deserialize;

/// Top-level payload of the v8 chart endpoint.
#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// API-level error object, present when the request was syntactically valid
/// but could not be served (unknown symbol, bad range).
#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

/// One result block per requested symbol.
///
/// `timestamp` and the quote arrays are parallel: index `i` of each array
/// describes the same session. Either may be absent entirely when the range
/// contains no trading days.
#[derive(Deserialize, Debug)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    pub quote: Vec<Quote>,
}

/// Parallel OHLCV arrays; `null` slots mark sessions without a usable quote.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}
