//! JSON snapshot data adapter.
//!
//! Reads the snapshot produced by the upstream fetch job:
//!
//! ```json
//! {
//!   "updated_utc": "2025-06-10T21:00:00+00:00",
//!   "tickers": { "SPY": [["2024-09-02", 470.1], ...], ... }
//! }
//! ```
//!
//! Rows carry only a close, so bars are synthesized close-only.

use crate::domain::error::PickError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[allow(dead_code)]
    updated_utc: Option<String>,
    tickers: BTreeMap<String, Vec<(String, f64)>>,
}

pub struct JsonDataAdapter {
    path: PathBuf,
    universe: Option<Vec<String>>,
}

impl JsonDataAdapter {
    pub fn new(path: PathBuf, universe: Option<Vec<String>>) -> Self {
        Self { path, universe }
    }

    fn wanted(&self, ticker: &str) -> bool {
        match &self.universe {
            Some(list) => list.iter().any(|t| t == ticker),
            None => true,
        }
    }
}

impl MarketDataPort for JsonDataAdapter {
    fn load_history(&self) -> Result<BTreeMap<String, Vec<Bar>>, PickError> {
        let content = fs::read_to_string(&self.path).map_err(|e| PickError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| PickError::Data {
                reason: format!("invalid snapshot {}: {}", self.path.display(), e),
            })?;

        let mut history = BTreeMap::new();
        for (ticker, rows) in snapshot.tickers {
            let ticker = ticker.to_uppercase();
            if !self.wanted(&ticker) {
                continue;
            }
            let mut bars = Vec::with_capacity(rows.len());
            let mut valid = true;
            for (date_str, close) in &rows {
                match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                    Ok(date) => bars.push(Bar::close_only(date, *close)),
                    Err(e) => {
                        eprintln!("Warning: skipping {} (bad date {:?}: {})", ticker, date_str, e);
                        valid = false;
                        break;
                    }
                }
            }
            if valid && !bars.is_empty() {
                bars.sort_by_key(|b| b.date);
                history.insert(ticker, bars);
            }
        }
        Ok(history)
    }
}
