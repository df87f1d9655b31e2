//! Daily OHLCV bar representation.

use chrono::NaiveDate;

/// One daily bar. Series are ascending by date; missing trading days are
/// simply absent. Close-only sources synthesize open = high = low = close
/// and volume = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    /// A bar carrying only a close price.
    pub fn close_only(date: NaiveDate, close: f64) -> Self {
        Bar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Extract the close column from a bar slice.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        }
    }

    #[test]
    fn true_range_hl_dominates() {
        let bar = sample_bar();
        // high-low=20, |110-100|=10, |90-100|=10 → 20
        assert!((bar.true_range(100.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let bar = sample_bar();
        // high-low=20, |110-70|=40, |90-70|=20 → 40
        assert!((bar.true_range(70.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_down() {
        let bar = sample_bar();
        // high-low=20, |110-130|=20, |90-130|=40 → 40
        assert!((bar.true_range(130.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn close_only_bar_collapses_range() {
        let bar = Bar::close_only(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(), 42.5);
        assert_eq!(bar.open, 42.5);
        assert_eq!(bar.high, 42.5);
        assert_eq!(bar.low, 42.5);
        assert_eq!(bar.volume, 0);
        // true range degrades to the close-to-close move
        assert!((bar.true_range(40.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn closes_column() {
        let bars = vec![
            Bar::close_only(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(), 1.0),
            Bar::close_only(NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(), 2.0),
        ];
        assert_eq!(closes(&bars), vec![1.0, 2.0]);
    }
}
