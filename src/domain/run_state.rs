//! State carried between runs.
//!
//! The previous run's shown list, buy list and per-ticker selection
//! streaks. Loaded at run start (missing or corrupt data degrades to the
//! empty default, never a failure) and replaced wholesale at run end;
//! the state object is never mutated field by field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub as_of: Option<NaiveDate>,
    pub top_list: Vec<String>,
    pub buy_list: Vec<String>,
    pub streaks: BTreeMap<String, u32>,
}

impl RunState {
    /// Consecutive-selection count for a ticker; absence means zero.
    pub fn streak(&self, ticker: &str) -> u32 {
        self.streaks.get(ticker).copied().unwrap_or(0)
    }

    /// The successor state for a finished run. Streaks increment for
    /// tickers in the new buy list; every other counter is dropped, so
    /// a skipped ticker implicitly restarts at zero.
    pub fn advance(
        &self,
        as_of: NaiveDate,
        top_list: Vec<String>,
        buy_list: Vec<String>,
    ) -> RunState {
        let streaks = buy_list
            .iter()
            .map(|t| (t.clone(), self.streak(t) + 1))
            .collect();
        RunState {
            as_of: Some(as_of),
            top_list,
            buy_list,
            streaks,
        }
    }
}
