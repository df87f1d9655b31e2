//! Shared helpers for integration tests.

use chrono::{Days, NaiveDate};
use std::cell::RefCell;
use std::collections::BTreeMap;
use trendpick::domain::error::PickError;
use trendpick::domain::ohlcv::Bar;
use trendpick::domain::run_state::RunState;
use trendpick::ports::data_port::MarketDataPort;
use trendpick::ports::state_port::RunStatePort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Rising series whose daily return is exactly `drift + pattern[i % len]`.
/// The wobble pattern controls pairwise return correlation: two series
/// sharing a pattern (and parity) correlate at ~1.0; a period-2 pattern
/// against a period-3 pattern correlates at ~0.
pub fn patterned_bars(n: usize, drift: f64, pattern: &[f64]) -> Vec<Bar> {
    let mut close = 100.0;
    (0..n)
        .map(|i| {
            close *= 1.0 + drift + pattern[i % pattern.len()];
            Bar {
                date: date(2024, 1, 1) + Days::new(i as u64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1000,
            }
        })
        .collect()
}

pub fn trending_bars(n: usize, drift: f64) -> Vec<Bar> {
    patterned_bars(n, drift, &[0.002, -0.002])
}

#[derive(Default)]
pub struct MockDataPort {
    history: BTreeMap<String, Vec<Bar>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.history.insert(ticker.to_string(), bars);
        self
    }
}

impl MarketDataPort for MockDataPort {
    fn load_history(&self) -> Result<BTreeMap<String, Vec<Bar>>, PickError> {
        Ok(self.history.clone())
    }
}

#[derive(Default)]
pub struct InMemoryStatePort {
    state: RefCell<RunState>,
}

impl InMemoryStatePort {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStatePort for InMemoryStatePort {
    fn load(&self) -> RunState {
        self.state.borrow().clone()
    }

    fn save(&self, state: &RunState) -> Result<(), PickError> {
        *self.state.borrow_mut() = state.clone();
        Ok(())
    }
}
