//! The asset façade: one symbol, one provider handle, one owned cache.

use chrono::{Duration, Utc};
use market_data::{
    models::request_params::BarsRequestParams,
    providers::DataProvider,
};
use shared_utils::math::round_to;
use tracing::debug;

use crate::{
    error::AssetError,
    history::HistoryTable,
    metrics::{
        self, BollingerRow, MovingMeanRow, StdDeviationRow, TrendReport,
    },
};

/// Window used by [`Asset::sharpe_ratio`], decoupled from the configured
/// default window and from the cache.
pub const SHARPE_WINDOW_DAYS: i64 = 365;

/// Fixed annual risk-free-rate assumption in the Sharpe formula.
const RISK_FREE_RATE: f64 = 0.1375;

/// A single tradeable asset: ticker symbol, provider handle, cache policy and
/// derived-metric accessors.
///
/// `cached_history` is the only mutable state. It is populated lazily on the
/// first uncached [`history`](Asset::history) call, cleared and repopulated by
/// [`refresh_history`](Asset::refresh_history), and never persisted. Each
/// instance owns its cache exclusively; the `&mut self` receivers encode the
/// no-concurrent-access contract.
pub struct Asset {
    symbol: String,
    provider: Box<dyn DataProvider + Send + Sync>,
    cache_enabled: bool,
    default_window_days: i64,
    cached_history: Option<HistoryTable>,
}

impl Asset {
    /// Creates an asset with caching enabled and a 30-day default window.
    pub fn new(symbol: impl Into<String>, provider: Box<dyn DataProvider + Send + Sync>) -> Self {
        Self {
            symbol: symbol.into(),
            provider,
            cache_enabled: true,
            default_window_days: 30,
            cached_history: None,
        }
    }

    /// Enables or disables the history cache.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Sets the default look-back window, in days.
    pub fn with_default_window(mut self, days: i64) -> Self {
        self.default_window_days = days;
        self
    }

    /// The ticker symbol this asset wraps.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the normalized price history.
    ///
    /// Without a `window_days` override the cached table is returned when
    /// caching is enabled and a cache is populated, with no provider call.
    /// Otherwise the effective window (`window_days`, or the configured
    /// default) is fetched as `[now - window, now]`, normalized, and stored
    /// in the cache only when caching is enabled and no override was given.
    pub async fn history(&mut self, window_days: Option<i64>) -> Result<HistoryTable, AssetError> {
        if window_days.is_none() && self.cache_enabled {
            if let Some(cached) = &self.cached_history {
                debug!(symbol = %self.symbol, "returning cached history");
                return Ok(cached.clone());
            }
        }

        let window = window_days.unwrap_or(self.default_window_days);
        let table = self.fetch_history(window).await?;

        if self.cache_enabled && window_days.is_none() {
            self.cached_history = Some(table.clone());
        }

        Ok(table)
    }

    /// Clears the cache and refetches the default window.
    ///
    /// Forces exactly one fresh provider call even when a cache is populated.
    /// No-op when caching is disabled.
    pub async fn refresh_history(&mut self) -> Result<(), AssetError> {
        if !self.cache_enabled {
            return Ok(());
        }

        debug!(symbol = %self.symbol, "invalidating cached history");
        self.cached_history = None;
        self.history(None).await?;
        Ok(())
    }

    /// Open-to-close percentage move per session plus the rounded sum of the
    /// raw per-row values.
    pub async fn trend_price(&mut self) -> Result<TrendReport, AssetError> {
        let table = self.history(None).await?;
        Ok(metrics::trend_report(&table))
    }

    /// Window mean of close, broadcast per row with an at-or-above flag.
    pub async fn moving_mean(&mut self) -> Result<Vec<MovingMeanRow>, AssetError> {
        let table = self.history(None).await?;
        Ok(metrics::moving_mean_rows(&table))
    }

    /// Sample standard deviation of close, broadcast per row.
    pub async fn standard_deviation(&mut self) -> Result<Vec<StdDeviationRow>, AssetError> {
        let table = self.history(None).await?;
        Ok(metrics::std_deviation_rows(&table))
    }

    /// Classifies each close against the Bollinger bands
    /// (mean +/- 2 standard deviations over the window).
    pub async fn bollinger_band_check(&mut self) -> Result<Vec<BollingerRow>, AssetError> {
        let table = self.history(None).await?;
        Ok(metrics::bollinger_rows(&table))
    }

    /// Annualized Sharpe ratio over a fixed 365-day window.
    ///
    /// Daily returns are summed per calendar month-of-year; the ratio is the
    /// compounded monthly return minus the fixed risk-free rate, divided by
    /// the sample standard deviation of the monthly sums, rounded to 2
    /// digits. The window is fetched as an override and never touches the
    /// cache.
    pub async fn sharpe_ratio(&mut self) -> Result<f64, AssetError> {
        let table = self.history(Some(SHARPE_WINDOW_DAYS)).await?;
        if table.is_empty() {
            return Err(AssetError::InsufficientData {
                reason: "history window returned no rows".to_string(),
            });
        }

        let monthly = metrics::monthly_return_sums(&table);
        if monthly.len() < 2 {
            return Err(AssetError::InsufficientData {
                reason: "fewer than two calendar months of returns".to_string(),
            });
        }

        let sums: Vec<f64> = monthly.into_values().collect();
        let std = metrics::sample_std(&sums);
        if std == 0.0 {
            return Err(AssetError::InsufficientData {
                reason: "monthly returns have zero dispersion".to_string(),
            });
        }

        let accumulated = metrics::accumulated_return(&sums);
        Ok(round_to((accumulated - RISK_FREE_RATE) / std, 2))
    }

    async fn fetch_history(&self, window_days: i64) -> Result<HistoryTable, AssetError> {
        let end = Utc::now();
        let start = end - Duration::days(window_days);
        debug!(symbol = %self.symbol, window_days, "fetching daily bars");

        let params = BarsRequestParams {
            symbols: vec![self.symbol.clone()],
            start,
            end,
            rounding: true,
        };

        let mut series_vec = self.provider.fetch_bars(params).await?;
        let position = series_vec
            .iter()
            .position(|series| series.symbol == self.symbol)
            .ok_or_else(|| AssetError::NoData {
                symbol: self.symbol.clone(),
            })?;

        Ok(HistoryTable::from_series(series_vec.swap_remove(position)))
    }
}
