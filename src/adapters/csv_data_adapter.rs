//! CSV directory data adapter.
//!
//! Reads one CSV file per ticker (`<TICKER>.csv`, stooq daily export
//! layout: `Date,Open,High,Low,Close,Volume`) from a base directory.
//! A file that fails to parse excludes that ticker with a warning; it
//! never fails the whole load.

use crate::domain::error::PickError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
    /// When set, only these tickers are loaded.
    universe: Option<Vec<String>>,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf, universe: Option<Vec<String>>) -> Self {
        Self {
            base_path,
            universe,
        }
    }

    fn wanted(&self, ticker: &str) -> bool {
        match &self.universe {
            Some(list) => list.iter().any(|t| t == ticker),
            None => true,
        }
    }

    fn parse_file(&self, path: &PathBuf) -> Result<Vec<Bar>, PickError> {
        let content = fs::read_to_string(path).map_err(|e| PickError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| PickError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
        };
        let date_col = column("date").ok_or_else(|| PickError::Data {
            reason: "missing Date column".into(),
        })?;
        let open_col = column("open");
        let high_col = column("high");
        let low_col = column("low");
        let close_col = column("close").ok_or_else(|| PickError::Data {
            reason: "missing Close column".into(),
        })?;
        let volume_col = column("volume");

        let field = |record: &csv::StringRecord, col: Option<usize>, fallback: f64| {
            col.and_then(|c| record.get(c))
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(fallback)
        };

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| PickError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            let date_str = record.get(date_col).ok_or_else(|| PickError::Data {
                reason: "short CSV row".into(),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| PickError::Data {
                    reason: format!("invalid date {:?}: {}", date_str, e),
                })?;
            let close: f64 = record
                .get(close_col)
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| PickError::Data {
                    reason: format!("invalid close on {}", date),
                })?;

            bars.push(Bar {
                date,
                open: field(&record, open_col, close),
                high: field(&record, high_col, close),
                low: field(&record, low_col, close),
                close,
                volume: record
                    .get(volume_col.unwrap_or(usize::MAX))
                    .and_then(|v| v.parse::<f64>().ok())
                    .map(|v| v as i64)
                    .unwrap_or(0),
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

impl MarketDataPort for CsvDataAdapter {
    fn load_history(&self) -> Result<BTreeMap<String, Vec<Bar>>, PickError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| PickError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut history = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| PickError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "csv") {
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_uppercase())
            else {
                continue;
            };
            if !self.wanted(&stem) {
                continue;
            }
            match self.parse_file(&path) {
                Ok(bars) if !bars.is_empty() => {
                    history.insert(stem, bars);
                }
                Ok(_) => {}
                Err(e) => eprintln!("Warning: skipping {} ({})", stem, e),
            }
        }
        Ok(history)
    }
}
