use market_data::providers::ProviderError;
use thiserror::Error;

/// The unified error type for asset analytics.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The market data provider failed (network, API, validation).
    #[error("provider request failed: {0}")]
    Provider(#[from] ProviderError),

    /// The provider reply carried no series for the requested symbol.
    #[error("no history returned for symbol {symbol}")]
    NoData {
        /// The symbol that came back empty.
        symbol: String,
    },

    /// The history window cannot support the requested computation.
    #[error("insufficient data for sharpe ratio: {reason}")]
    InsufficientData {
        /// What precondition failed.
        reason: String,
    },
}
