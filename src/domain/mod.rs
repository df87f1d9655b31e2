//! Core domain types and logic.

pub mod ohlcv;
pub mod indicators;
pub mod regime;
pub mod calendar;
pub mod candidate;
pub mod config;
pub mod scorer;
pub mod selector;
pub mod run_state;
pub mod engine;
pub mod error;
