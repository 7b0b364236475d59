//! Provider implementation for Yahoo Finance's v8 chart REST API.
//!
//! The chart endpoint is unauthenticated and returns daily OHLCV data as
//! parallel arrays keyed by unix timestamps. Sessions where the exchange
//! reported no quote (halts, partial data) come back as `null` slots and are
//! skipped during conversion.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooProvider;
