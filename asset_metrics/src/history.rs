//! Normalized per-asset price history.
//!
//! [`HistoryTable`] is the canonical input for every derived metric. It owns
//! one row per trading day, sorted ascending by date, with duplicates dropped.
//! Normalization is idempotent: re-normalizing an already-normalized table is
//! a no-op.

use chrono::NaiveDate;
use market_data::models::bar::BarSeries;
use serde::Serialize;

/// One trading day inside a [`HistoryTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    /// The trading day (pure calendar date).
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded.
    pub volume: u64,
}

/// An ordered, duplicate-free sequence of daily rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryTable {
    rows: Vec<HistoryRow>,
}

impl HistoryTable {
    /// Builds a normalized table from a provider [`BarSeries`].
    pub fn from_series(series: BarSeries) -> Self {
        let rows = series
            .bars
            .into_iter()
            .map(|bar| HistoryRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Builds a normalized table from raw rows: sorts ascending by date and
    /// keeps the first row of any duplicated date.
    pub fn from_rows(mut rows: Vec<HistoryRow>) -> Self {
        rows.sort_by_key(|row| row.date);
        rows.dedup_by_key(|row| row.date);
        Self { rows }
    }

    /// The normalized rows, oldest first.
    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.close).collect()
    }

    /// Number of trading days in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the window contained no trading days.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, close: f64) -> HistoryRow {
        HistoryRow {
            date: date.parse().unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn sorts_rows_ascending_by_date() {
        let table = HistoryTable::from_rows(vec![
            row("2024-01-03", 3.0),
            row("2024-01-01", 1.0),
            row("2024-01-02", 2.0),
        ]);
        let dates: Vec<_> = table.rows().iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn drops_duplicate_dates_keeping_first() {
        let table = HistoryTable::from_rows(vec![
            row("2024-01-01", 1.0),
            row("2024-01-02", 2.0),
            row("2024-01-02", 9.0),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].close, 2.0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = HistoryTable::from_rows(vec![
            row("2024-01-02", 2.0),
            row("2024-01-01", 1.0),
            row("2024-01-01", 7.0),
        ]);
        let twice = HistoryTable::from_rows(once.rows().to_vec());
        assert_eq!(once, twice);
    }

    #[test]
    fn closes_follow_date_order() {
        let table = HistoryTable::from_rows(vec![row("2024-01-02", 2.0), row("2024-01-01", 1.0)]);
        assert_eq!(table.closes(), vec![1.0, 2.0]);
    }
}
