//! Canonical in-memory representation of a daily OHLCV bar.
//!
//! This struct is used as the standard output for all
//! [`DataProvider`](crate::providers::DataProvider) implementations,
//! regardless of vendor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single trading day's OHLCV record.
///
/// The date is a pure calendar day; daily bars carry no time-of-day.
/// Immutable once returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// The trading day this bar covers.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the session.
    pub high: f64,

    /// Lowest price during the session.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares (or units) traded during the session.
    pub volume: u64,
}

/// A complete set of daily bars for a single symbol.
///
/// Bars are ordered ascending by date, one per trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL", "PETR4.SA").
    pub symbol: String,
    /// The collection of OHLCV bars.
    pub bars: Vec<Bar>,
}
