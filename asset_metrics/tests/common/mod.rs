#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use market_data::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{DataProvider, ProviderError},
};

/// Provider that replays canned bar sets in order and counts fetches.
///
/// Once the queue is drained the last response is repeated, so a single
/// entry behaves like a provider with stable upstream data.
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<Vec<Bar>>>,
    last: Mutex<Vec<Bar>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Vec<Bar>>) -> Self {
        Self {
            queue: Mutex::new(responses.into()),
            last: Mutex::new(Vec::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn repeating(bars: Vec<Bar>) -> Self {
        Self::new(vec![bars])
    }

    /// Shared fetch counter; clone before boxing the provider into an Asset.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let bars = {
            let mut queue = self.queue.lock().unwrap();
            match queue.pop_front() {
                Some(bars) => {
                    *self.last.lock().unwrap() = bars.clone();
                    bars
                }
                None => self.last.lock().unwrap().clone(),
            }
        };

        Ok(vec![BarSeries {
            symbol: params.symbols[0].clone(),
            bars,
        }])
    }
}

/// Provider whose reply never contains the requested symbol.
pub struct EmptyProvider;

#[async_trait]
impl DataProvider for EmptyProvider {
    async fn fetch_bars(
        &self,
        _params: BarsRequestParams,
    ) -> Result<Vec<BarSeries>, ProviderError> {
        Ok(vec![])
    }
}

pub fn bar(date: &str, open: f64, close: f64) -> Bar {
    Bar {
        date: date.parse().unwrap(),
        open,
        high: open.max(close),
        low: open.min(close),
        close,
        volume: 1_000,
    }
}

/// Flat bars on consecutive days starting 2024-01-01, one per close.
pub fn daily_bars(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base + Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        })
        .collect()
}
