//! Descriptive analytics over a single asset's daily price history.
//!
//! [`Asset`](asset::Asset) wraps one ticker symbol and a
//! [`DataProvider`](market_data::providers::DataProvider) handle, lazily
//! caches the fetched history, and derives a handful of indicators from it:
//! open-to-close trend, moving mean, standard deviation, Bollinger-band
//! classification and an annualized Sharpe ratio.

pub mod asset;
pub mod error;
pub mod history;
pub mod metrics;
