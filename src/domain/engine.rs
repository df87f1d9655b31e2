//! One pick-selection run.
//!
//! Pure, synchronous, deterministic: same price history + same prior
//! run-state + same date ⇒ same report. All I/O happens before (data
//! load) and after (state save, report write) this module.

use crate::domain::calendar::{month_gate, CalendarState};
use crate::domain::candidate::Candidate;
use crate::domain::config::EngineConfig;
use crate::domain::ohlcv::{closes, Bar};
use crate::domain::regime::{detect_regime, RegimeState};
use crate::domain::run_state::RunState;
use crate::domain::scorer::{score_universe, ScoreInputs};
use crate::domain::selector::select_diversified;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Picks,
    /// No eligible candidates this run; the report carries the reason.
    NoPicks,
}

#[derive(Debug, Clone)]
pub struct PickReport {
    pub as_of: NaiveDate,
    pub status: RunStatus,
    pub regime: RegimeState,
    pub calendar: CalendarState,
    /// Top-ranked candidates for display, eligible first.
    pub shown: Vec<Candidate>,
    /// The buy subset, in acceptance order.
    pub buys: Vec<Candidate>,
    /// Buy tickers appended by the correlation-ignoring top-up pass.
    pub relaxed: Vec<String>,
    /// Successor run-state; the caller persists it wholesale.
    pub next_state: RunState,
}

pub fn run(
    prices: &BTreeMap<String, Vec<Bar>>,
    prior: &RunState,
    today: NaiveDate,
    config: &EngineConfig,
) -> PickReport {
    let benchmark_closes = prices
        .get(&config.benchmark)
        .map(|bars| closes(bars))
        .unwrap_or_default();
    let regime = detect_regime(&benchmark_closes);
    let calendar = month_gate(today, config.late_window);

    let ranked = score_universe(
        prices,
        &ScoreInputs {
            regime: &regime,
            calendar: &calendar,
            prior,
            config,
        },
    );

    let selection = select_diversified(&ranked, config);

    let shown: Vec<Candidate> = ranked.iter().take(config.shown_count).cloned().collect();
    let buys: Vec<Candidate> = selection
        .picked
        .iter()
        .filter_map(|t| ranked.iter().find(|c| &c.ticker == t).cloned())
        .collect();

    let top_list: Vec<String> = shown.iter().map(|c| c.ticker.clone()).collect();
    let next_state = prior.advance(today, top_list, selection.picked.clone());

    let status = if buys.is_empty() {
        RunStatus::NoPicks
    } else {
        RunStatus::Picks
    };

    PickReport {
        as_of: today,
        status,
        regime,
        calendar,
        shown,
        buys,
        relaxed: selection.relaxed,
        next_state,
    }
}
