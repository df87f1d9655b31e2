//! Candidate scoring and ranking.
//!
//! For each instrument with enough history: compute indicators, decide
//! eligibility, compute the composite score, emit one [`Candidate`].
//! Instruments with missing mandatory indicators or degenerate data are
//! excluded from the results entirely, a silent filter rather than an error.

use crate::domain::calendar::CalendarState;
use crate::domain::candidate::Candidate;
use crate::domain::config::EngineConfig;
use crate::domain::indicators::{
    atr_percent, daily_returns, max_drawdown, moving_average, period_return, relative_strength,
    rsi, volatility, volume_surge,
};
use crate::domain::ohlcv::{closes, Bar};
use crate::domain::regime::RegimeState;
use crate::domain::run_state::RunState;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const MA_FAST: usize = 20;
pub const MA_MID: usize = 50;
pub const MA_SLOW: usize = 200;
pub const RET_SHORT: usize = 10;
pub const RET_MID: usize = 20;
pub const RET_LONG: usize = 60;
pub const VOL_WINDOW: usize = 20;
pub const ATR_PERIOD: usize = 14;
pub const SURGE_WINDOW: usize = 20;
pub const RSI_PERIOD: usize = 14;
pub const RS_WINDOW: usize = 60;
pub const DRAWDOWN_LOOKBACK: usize = 60;
/// Fade guard: a positive 20-day run whose 10-day leg has decayed below
/// this fraction of it is excluded as momentum-chasing.
pub const FADE_RATIO: f64 = 0.35;

pub struct ScoreInputs<'a> {
    pub regime: &'a RegimeState,
    pub calendar: &'a CalendarState,
    pub prior: &'a RunState,
    pub config: &'a EngineConfig,
}

/// Score every instrument in the universe and rank the results by
/// `(eligible desc, score desc, ticker asc)`. Eligibility is always the
/// primary key, so an ineligible instrument never outranks an eligible
/// one regardless of score.
pub fn score_universe(
    prices: &BTreeMap<String, Vec<Bar>>,
    inputs: &ScoreInputs,
) -> Vec<Candidate> {
    let benchmark_closes = prices
        .get(&inputs.config.benchmark)
        .map(|bars| closes(bars));

    let mut candidates: Vec<Candidate> = prices
        .iter()
        .filter_map(|(ticker, bars)| {
            score_instrument(ticker, bars, benchmark_closes.as_deref(), inputs)
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.eligible
            .cmp(&a.eligible)
            .then(b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    candidates
}

fn score_instrument(
    ticker: &str,
    bars: &[Bar],
    benchmark_closes: Option<&[f64]>,
    inputs: &ScoreInputs,
) -> Option<Candidate> {
    let config = inputs.config;
    if bars.len() < config.min_history {
        return None;
    }
    let close_col = closes(bars);
    let last_close = *close_col.last()?;

    let ma_fast = moving_average(&close_col, MA_FAST)?;
    let ma_mid = moving_average(&close_col, MA_MID)?;
    let ma_slow = moving_average(&close_col, MA_SLOW)?;

    let ret_10d = period_return(&close_col, RET_SHORT)?;
    let ret_20d = period_return(&close_col, RET_MID)?;
    let ret_60d = period_return(&close_col, RET_LONG)?;
    let vol = volatility(&close_col, VOL_WINDOW)?;
    if vol <= 0.0 {
        // duplicated or degenerate price data; keep it out of scoring
        return None;
    }

    if config.fade_guard && ret_20d > 0.0 && ret_10d < FADE_RATIO * ret_20d {
        return None;
    }

    let trend_strong = last_close > ma_fast && ma_fast > ma_mid && ma_mid > ma_slow;
    let defensive = config.defensive.iter().any(|d| d == ticker);
    let eligible =
        last_close > ma_fast && (inputs.regime.risk_on || trend_strong || defensive);

    let atr_pct = atr_percent(bars, ATR_PERIOD);
    let surge = volume_surge(bars, SURGE_WINDOW);
    let rel = benchmark_closes.and_then(|b| relative_strength(&close_col, b, RS_WINDOW));
    let rsi_val = rsi(&close_col, RSI_PERIOD);
    let drawdown = max_drawdown(&close_col, DRAWDOWN_LOOKBACK);
    let returns_window =
        daily_returns(&close_col, config.correlation_window).unwrap_or_default();

    let streak = inputs.prior.streak(ticker);
    let held = inputs.prior.buy_list.iter().any(|t| t == ticker);

    let w = &config.weights;
    let vol_penalty = if inputs.regime.risk_on {
        w.vol_penalty_risk_on
    } else {
        w.vol_penalty_risk_off
    } + if inputs.calendar.late_mode {
        w.vol_penalty_late
    } else {
        0.0
    };

    let mut score = w.ret_60d * ret_60d + w.ret_20d * ret_20d;
    if trend_strong {
        score += w.trend_bonus;
    }
    score -= vol_penalty * vol;
    if let Some(rs) = rel {
        score += w.rel_strength * rs;
    }
    if let Some(s) = surge {
        if s > 1.0 {
            score += (w.surge_slope * (s - 1.0)).min(w.surge_cap);
        }
    }
    if let Some(atr) = atr_pct {
        score *= (1.0 - atr / w.atr_scale).max(w.atr_floor);
    }
    if w.rsi_overbought > 0.0 {
        if let Some(r) = rsi_val {
            if r > 70.0 {
                score -= w.rsi_overbought * (r - 70.0) / 30.0;
            }
        }
    }
    if w.drawdown > 0.0 {
        if let Some(dd) = drawdown {
            score -= w.drawdown * dd;
        }
    }
    score -= w.staleness * streak.min(w.staleness_cap) as f64;
    if !inputs.regime.risk_on_short {
        score *= w.short_off_mult;
    }
    if inputs.calendar.late_mode && held {
        score += w.stickiness;
    }

    Some(Candidate {
        ticker: ticker.to_string(),
        last_close,
        ret_10d,
        ret_20d,
        ret_60d,
        volatility: vol,
        trend_strong,
        atr_pct,
        volume_surge: surge,
        rel_strength: rel,
        rsi: rsi_val,
        max_drawdown: drawdown,
        eligible,
        score,
        returns_window,
    })
}
