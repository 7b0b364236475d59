use asset_metrics::{
    history::{HistoryRow, HistoryTable},
    metrics::{self, Situation},
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared_utils::math::round_to;

fn row(date: NaiveDate, open: f64, close: f64) -> HistoryRow {
    HistoryRow {
        date,
        open,
        high: open.max(close),
        low: open.min(close),
        close,
        volume: 1_000,
    }
}

fn sequential_table(pairs: &[(f64, f64)]) -> HistoryTable {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    HistoryTable::from_rows(
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(open, close))| row(base + Duration::days(i as i64), open, close))
            .collect(),
    )
}

proptest! {
    #[test]
    fn above_average_matches_independent_check(
        closes in prop::collection::vec(1.0f64..10_000.0, 1..40),
    ) {
        let pairs: Vec<(f64, f64)> = closes.iter().map(|&c| (c, c)).collect();
        let rows = metrics::moving_mean_rows(&sequential_table(&pairs));

        let expected_mean = round_to(closes.iter().sum::<f64>() / closes.len() as f64, 2);
        for (i, r) in rows.iter().enumerate() {
            prop_assert_eq!(r.mean, expected_mean);
            prop_assert_eq!(r.above_average, closes[i] >= expected_mean);
        }
    }

    #[test]
    fn trend_sum_is_rounded_sum_of_raw_values(
        pairs in prop::collection::vec((1.0f64..1_000.0, 1.0f64..1_000.0), 1..40),
    ) {
        let report = metrics::trend_report(&sequential_table(&pairs));

        let raw_sum: f64 = report.rows.iter().map(|r| r.diff_percentage).sum();
        prop_assert_eq!(report.accumulated_percentage_sum, round_to(raw_sum, 2));

        // Formatting is derived from the raw value, never the other way round.
        for r in &report.rows {
            prop_assert_eq!(&r.diff_percentage_text, &format!("{}%", r.diff_percentage));
        }
    }

    #[test]
    fn normalization_is_idempotent(
        entries in prop::collection::vec((0i64..120, 1.0f64..1_000.0), 1..40),
    ) {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows: Vec<HistoryRow> = entries
            .iter()
            .map(|&(offset, close)| row(base + Duration::days(offset), close, close))
            .collect();

        let once = HistoryTable::from_rows(rows);
        let twice = HistoryTable::from_rows(once.rows().to_vec());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn bollinger_classification_matches_bands(
        closes in prop::collection::vec(1.0f64..10_000.0, 2..40),
    ) {
        let pairs: Vec<(f64, f64)> = closes.iter().map(|&c| (c, c)).collect();
        let table = sequential_table(&pairs);
        let rows = metrics::bollinger_rows(&table);

        let mean = metrics::mean(&table.closes());
        let std = metrics::sample_std(&table.closes());
        let (upper, lower) = (mean + 2.0 * std, mean - 2.0 * std);

        for r in &rows {
            let expected = if r.close > upper {
                Situation::Overvalued
            } else if r.close < lower {
                Situation::Undervalued
            } else {
                Situation::Normal
            };
            prop_assert_eq!(r.situation, expected);
        }
    }
}
