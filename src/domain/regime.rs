//! Market regime detection from a benchmark close series.
//!
//! The benchmark's last close against its long and medium moving
//! averages yields two booleans, the only regime signal consumed
//! downstream. With fewer than [`MIN_BARS`] closes the detector fails
//! open: both flags are true and the metrics are unavailable, so an
//! unknown regime never suppresses all picks.

use crate::domain::indicators::moving_average;

pub const MIN_BARS: usize = 210;
pub const MA_LONG: usize = 200;
pub const MA_SHORT: usize = 50;

#[derive(Debug, Clone)]
pub struct RegimeState {
    pub risk_on: bool,
    pub risk_on_short: bool,
    pub benchmark_last: Option<f64>,
    pub benchmark_ma_long: Option<f64>,
    pub benchmark_ma_short: Option<f64>,
}

impl RegimeState {
    /// Fail-open default: risk on, metrics unavailable.
    pub fn open() -> Self {
        RegimeState {
            risk_on: true,
            risk_on_short: true,
            benchmark_last: None,
            benchmark_ma_long: None,
            benchmark_ma_short: None,
        }
    }
}

pub fn detect_regime(benchmark_closes: &[f64]) -> RegimeState {
    if benchmark_closes.len() < MIN_BARS {
        return RegimeState::open();
    }
    let last = benchmark_closes[benchmark_closes.len() - 1];
    match (
        moving_average(benchmark_closes, MA_LONG),
        moving_average(benchmark_closes, MA_SHORT),
    ) {
        (Some(ma_long), Some(ma_short)) => RegimeState {
            risk_on: last > ma_long,
            risk_on_short: last > ma_short,
            benchmark_last: Some(last),
            benchmark_ma_long: Some(ma_long),
            benchmark_ma_short: Some(ma_short),
        },
        _ => RegimeState::open(),
    }
}
