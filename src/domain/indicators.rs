//! Pure indicator functions over daily price history.
//!
//! Every function returns `Option<f64>` (or `Option<Vec<f64>>`): `None`
//! means the precondition failed: insufficient history or a degenerate
//! denominator. Callers must treat `None` as an exclusion signal, never
//! as zero, and no function ever yields NaN on well-formed input.

use crate::domain::ohlcv::Bar;

/// Arithmetic mean of the last `window` closes.
pub fn moving_average(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window {
        return None;
    }
    let sum: f64 = closes[closes.len() - window..].iter().sum();
    Some(sum / window as f64)
}

/// Fractional return over the trailing `window` days:
/// `close[-1] / close[-1-window] - 1`.
pub fn period_return(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window + 1 {
        return None;
    }
    let last = closes[closes.len() - 1];
    let base = closes[closes.len() - 1 - window];
    if base == 0.0 {
        return None;
    }
    Some(last / base - 1.0)
}

/// The last `window` single-day returns, oldest first. Needs `window + 1`
/// closes; any zero denominator inside the window invalidates it.
pub fn daily_returns(closes: &[f64], window: usize) -> Option<Vec<f64>> {
    if window == 0 || closes.len() < window + 1 {
        return None;
    }
    let start = closes.len() - window;
    let mut out = Vec::with_capacity(window);
    for i in start..closes.len() {
        let prev = closes[i - 1];
        if prev == 0.0 {
            return None;
        }
        out.push(closes[i] / prev - 1.0);
    }
    Some(out)
}

/// Population standard deviation of the trailing `window` daily returns.
pub fn volatility(closes: &[f64], window: usize) -> Option<f64> {
    let returns = daily_returns(closes, window)?;
    Some(population_stddev(&returns))
}

fn population_stddev(xs: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let variance = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    variance.sqrt()
}

/// Mean true range over the trailing `period` days, as a fraction of the
/// latest close. Needs `period + 1` bars for the previous-close seed.
pub fn atr_percent(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }
    let last_close = bars[bars.len() - 1].close;
    if last_close == 0.0 {
        return None;
    }
    let start = bars.len() - period;
    let mut sum = 0.0;
    for i in start..bars.len() {
        sum += bars[i].true_range(bars[i - 1].close);
    }
    Some(sum / period as f64 / last_close)
}

/// Latest volume over the trailing `window`-day average volume.
pub fn volume_surge(bars: &[Bar], window: usize) -> Option<f64> {
    if window == 0 || bars.len() < window {
        return None;
    }
    let avg: f64 = bars[bars.len() - window..]
        .iter()
        .map(|b| b.volume as f64)
        .sum::<f64>()
        / window as f64;
    if avg <= 0.0 {
        return None;
    }
    Some(bars[bars.len() - 1].volume as f64 / avg)
}

/// Instrument period return minus benchmark period return over the same
/// window. Unavailable if either side lacks history.
pub fn relative_strength(
    instrument: &[f64],
    benchmark: &[f64],
    window: usize,
) -> Option<f64> {
    let inst = period_return(instrument, window)?;
    let bench = period_return(benchmark, window)?;
    Some(inst - bench)
}

/// RSI over the trailing `period` daily changes: simple mean of gains
/// over simple mean of losses. 100 when trailing losses are zero.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }
    let start = closes.len() - period;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in start..closes.len() {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum -= change;
        }
    }
    if loss_sum == 0.0 {
        return Some(100.0);
    }
    let rs = gain_sum / loss_sum;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Largest peak-to-trough fractional decline within the trailing
/// `lookback` closes. Always >= 0.
pub fn max_drawdown(closes: &[f64], lookback: usize) -> Option<f64> {
    if lookback < 2 || closes.len() < lookback {
        return None;
    }
    let window = &closes[closes.len() - lookback..];
    let mut peak = window[0];
    let mut worst = 0.0_f64;
    for &c in &window[1..] {
        if c > peak {
            peak = c;
        } else if peak > 0.0 {
            worst = worst.max((peak - c) / peak);
        }
    }
    Some(worst)
}

/// Pearson correlation over the last `min(len(a), len(b))` aligned
/// points. `None` for empty input or a zero-variance denominator, which
/// callers treat as "not similar".
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n == 0 {
        return None;
    }
    let a = &a[a.len() - n..];
    let b = &b[b.len() - n..];
    let nf = n as f64;
    let mean_a = a.iter().sum::<f64>() / nf;
    let mean_b = b.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..n {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}
