//! Diversification-constrained pick selection.
//!
//! Greedy walk down the ranked eligible list, rejecting any candidate
//! whose trailing return series correlates above the threshold with an
//! already-accepted pick. Correlation is a soft preference: if the
//! constraint leaves the quota unfilled, a top-up pass re-scans the list
//! and appends remaining candidates regardless of correlation.

use crate::domain::candidate::Candidate;
use crate::domain::config::EngineConfig;
use crate::domain::indicators::pearson;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Tickers to buy, in acceptance order.
    pub picked: Vec<String>,
    /// Subset of `picked` appended by the correlation-ignoring top-up.
    pub relaxed: Vec<String>,
}

pub fn select_diversified(ranked: &[Candidate], config: &EngineConfig) -> Selection {
    let target = config.pick_count;
    let window = config.correlation_window;
    let threshold = config.correlation_threshold;

    let eligible: Vec<&Candidate> = ranked.iter().filter(|c| c.eligible).collect();
    let mut accepted: Vec<&Candidate> = Vec::with_capacity(target);

    for candidate in &eligible {
        if accepted.len() >= target {
            break;
        }
        // a short return series cannot be vetted; it only re-enters in
        // the top-up pass
        if candidate.returns_window.len() < window {
            continue;
        }
        let too_similar = accepted.iter().any(|pick| {
            // None (zero variance) counts as not similar
            pearson(&candidate.returns_window, &pick.returns_window)
                .is_some_and(|r| r > threshold)
        });
        if !too_similar {
            accepted.push(candidate);
        }
    }

    let mut relaxed = Vec::new();
    if accepted.len() < target {
        for candidate in &eligible {
            if accepted.len() >= target {
                break;
            }
            if accepted.iter().any(|p| p.ticker == candidate.ticker) {
                continue;
            }
            accepted.push(candidate);
            relaxed.push(candidate.ticker.clone());
        }
    }

    Selection {
        picked: accepted.iter().map(|c| c.ticker.clone()).collect(),
        relaxed,
    }
}
