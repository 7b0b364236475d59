use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Universal parameters for requesting daily bars from any market data provider.
///
/// This struct is vendor-agnostic and is the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// List of symbols to request (e.g., `["AAPL"]`, `["BTC-USD"]`).
    pub symbols: Vec<String>,

    /// Start of the requested time range (inclusive, UTC).
    ///
    /// Providers return bars for trading days at or after this timestamp.
    pub start: DateTime<Utc>,

    /// End of the requested time range (inclusive, UTC).
    pub end: DateTime<Utc>,

    /// When set, providers round prices to two decimal digits.
    pub rounding: bool,
}
