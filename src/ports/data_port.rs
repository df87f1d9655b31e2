//! Market data access port trait.
//!
//! Fetching and parsing raw prices is a collaborator concern; the engine
//! only consumes the finished per-ticker history map. An ordered map
//! keeps universe iteration, and therefore output, deterministic.

use crate::domain::error::PickError;
use crate::domain::ohlcv::Bar;
use std::collections::BTreeMap;

pub trait MarketDataPort {
    /// Full daily history per ticker, each series ascending by date.
    /// An empty map is valid input (the engine reports no picks).
    fn load_history(&self) -> Result<BTreeMap<String, Vec<Bar>>, PickError>;
}
