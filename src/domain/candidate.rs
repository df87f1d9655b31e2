//! Per-instrument scoring result.

/// One scored instrument for one run.
///
/// Mandatory indicators (returns, volatility, the moving-average chain)
/// are plain `f64` because an instrument without them never becomes a
/// `Candidate` at all. Optional metrics stay `Option` and scoring skips
/// the corresponding term when absent; absence is never zero.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub ticker: String,
    pub last_close: f64,
    pub ret_10d: f64,
    pub ret_20d: f64,
    pub ret_60d: f64,
    pub volatility: f64,
    pub trend_strong: bool,
    pub atr_pct: Option<f64>,
    pub volume_surge: Option<f64>,
    pub rel_strength: Option<f64>,
    pub rsi: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub eligible: bool,
    pub score: f64,
    /// Trailing daily returns, oldest first, for pairwise correlation.
    pub returns_window: Vec<f64>,
}

impl Candidate {
    /// Human-readable one-line explanation for display next to the pick.
    pub fn rationale(&self) -> String {
        let mut parts = vec![
            format!("60d {:+.1}%", self.ret_60d * 100.0),
            format!("20d {:+.1}%", self.ret_20d * 100.0),
            format!("10d {:+.1}%", self.ret_10d * 100.0),
            format!("vol {:.2}%", self.volatility * 100.0),
        ];
        if self.trend_strong {
            parts.push("trend strong".to_string());
        }
        if let Some(rs) = self.rel_strength {
            parts.push(format!("RS {:+.1}%", rs * 100.0));
        }
        if let Some(surge) = self.volume_surge {
            if surge > 1.0 {
                parts.push(format!("volume {:.1}x", surge));
            }
        }
        if let Some(atr) = self.atr_pct {
            parts.push(format!("ATR {:.1}%", atr * 100.0));
        }
        if let Some(rsi) = self.rsi {
            parts.push(format!("RSI {:.0}", rsi));
        }
        if !self.eligible {
            parts.push("not eligible".to_string());
        }
        parts.join(", ")
    }
}
