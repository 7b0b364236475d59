//! Pure, independently testable metric transforms.
//!
//! Each derived table is produced by a named function from
//! [`HistoryTable`](crate::history::HistoryTable) to typed rows; nothing in
//! this module fetches data or touches the cache.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared_utils::math::round_to;

use crate::history::HistoryTable;

/// One row of the open-to-close trend table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Closing price.
    pub close: f64,
    /// Negated percentage shortfall of close from open, rounded to 2 digits.
    /// Positive means the price rose over the session.
    pub diff_percentage: f64,
    /// `diff_percentage` rendered for display, e.g. `"10%"`.
    pub diff_percentage_text: String,
}

/// The trend table plus its aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    /// Sum of the raw per-row `diff_percentage` values, rounded to 2 digits.
    /// Computed before any display formatting.
    pub accumulated_percentage_sum: f64,
    /// Per-day rows, oldest first.
    pub rows: Vec<TrendRow>,
}

/// One row of the moving-mean table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingMeanRow {
    /// Trading day.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
    /// Mean of close over the whole window, rounded to 2 digits (same scalar
    /// on every row).
    pub mean: f64,
    /// Whether this close sits at or above the window mean.
    pub above_average: bool,
}

/// One row of the standard-deviation table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StdDeviationRow {
    /// Trading day.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
    /// Sample standard deviation of close over the whole window (same scalar
    /// on every row); NaN when the window has fewer than 2 rows.
    pub standard_deviation: f64,
}

/// Bollinger-band classification of one session's close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Situation {
    /// Close sits strictly above the upper band.
    Overvalued,
    /// Close sits strictly below the lower band.
    Undervalued,
    /// Close sits inside the bands; band touches count as normal.
    Normal,
}

/// One row of the Bollinger check table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerRow {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded.
    pub volume: u64,
    /// Position of the close relative to mean +/- 2 standard deviations.
    pub situation: Situation,
}

/// Arithmetic mean; NaN over an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 divisor); NaN below 2 values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Percentage change between consecutive closes, rounded to 6 digits.
///
/// Returns one value per close after the first; the first close has no prior
/// bar and therefore no return.
pub fn pct_change_rounded(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|pair| round_to(pair[1] / pair[0] - 1.0, 6))
        .collect()
}

/// Builds the trend table: per-session percentage move and its rounded sum.
///
/// An open of zero yields non-finite values that flow through untouched.
pub fn trend_report(table: &HistoryTable) -> TrendReport {
    let rows: Vec<TrendRow> = table
        .rows()
        .iter()
        .map(|row| {
            let diff_percentage = round_to(100.0 - row.close * 100.0 / row.open, 2) * -1.0;
            TrendRow {
                date: row.date,
                open: row.open,
                close: row.close,
                diff_percentage,
                diff_percentage_text: format!("{diff_percentage}%"),
            }
        })
        .collect();

    let accumulated_percentage_sum =
        round_to(rows.iter().map(|row| row.diff_percentage).sum::<f64>(), 2);

    TrendReport {
        accumulated_percentage_sum,
        rows,
    }
}

/// Builds the moving-mean table: window mean broadcast to every row.
pub fn moving_mean_rows(table: &HistoryTable) -> Vec<MovingMeanRow> {
    let window_mean = round_to(mean(&table.closes()), 2);
    table
        .rows()
        .iter()
        .map(|row| MovingMeanRow {
            date: row.date,
            close: row.close,
            mean: window_mean,
            above_average: row.close >= window_mean,
        })
        .collect()
}

/// Builds the standard-deviation table: window std broadcast to every row.
pub fn std_deviation_rows(table: &HistoryTable) -> Vec<StdDeviationRow> {
    let std = sample_std(&table.closes());
    table
        .rows()
        .iter()
        .map(|row| StdDeviationRow {
            date: row.date,
            close: row.close,
            standard_deviation: std,
        })
        .collect()
}

/// Classifies every close against mean +/- 2 standard deviations.
///
/// With fewer than 2 rows the bands are NaN and every comparison is false,
/// so everything classifies as [`Situation::Normal`].
pub fn bollinger_rows(table: &HistoryTable) -> Vec<BollingerRow> {
    let closes = table.closes();
    let window_mean = mean(&closes);
    let std = sample_std(&closes);
    let upper = window_mean + 2.0 * std;
    let lower = window_mean - 2.0 * std;

    table
        .rows()
        .iter()
        .map(|row| BollingerRow {
            date: row.date,
            open: row.open,
            close: row.close,
            volume: row.volume,
            situation: classify(row.close, upper, lower),
        })
        .collect()
}

fn classify(close: f64, upper: f64, lower: f64) -> Situation {
    if close > upper {
        Situation::Overvalued
    } else if close < lower {
        Situation::Undervalued
    } else {
        Situation::Normal
    }
}

/// Sums daily returns per calendar month-of-year (1-12), keyed and ordered by
/// month number.
///
/// Every month present in the table gets an entry, including the first bar's
/// month even when it contributes no return.
pub fn monthly_return_sums(table: &HistoryTable) -> BTreeMap<u32, f64> {
    let mut sums: BTreeMap<u32, f64> = BTreeMap::new();
    for row in table.rows() {
        sums.entry(row.date.month()).or_insert(0.0);
    }

    let returns = pct_change_rounded(&table.closes());
    for (row, daily_return) in table.rows().iter().skip(1).zip(returns) {
        *sums.entry(row.date.month()).or_insert(0.0) += daily_return;
    }
    sums
}

/// Cumulative compounded return of a sequence of periodic returns:
/// `prod(1 + r) - 1` evaluated at the last period.
pub fn accumulated_return(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}
