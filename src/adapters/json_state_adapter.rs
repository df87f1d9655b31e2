//! JSON file run-state store.
//!
//! `load` never fails: a missing or corrupt file degrades to the empty
//! default with a warning. `save` replaces the file atomically by
//! writing a sibling temp file and renaming it over the target.

use crate::domain::error::PickError;
use crate::domain::run_state::RunState;
use crate::ports::state_port::RunStatePort;
use std::fs;
use std::path::PathBuf;

pub struct JsonStateAdapter {
    path: PathBuf,
}

impl JsonStateAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RunStatePort for JsonStateAdapter {
    fn load(&self) -> RunState {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return RunState::default(), // first run or moved file
        };
        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                eprintln!(
                    "Warning: corrupt run-state {} ({}), starting fresh",
                    self.path.display(),
                    e
                );
                RunState::default()
            }
        }
    }

    fn save(&self, state: &RunState) -> Result<(), PickError> {
        let json = serde_json::to_string_pretty(state).map_err(|e| PickError::State {
            reason: format!("serialize failed: {}", e),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| PickError::State {
            reason: format!("write {} failed: {}", tmp.display(), e),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| PickError::State {
            reason: format!("rename to {} failed: {}", self.path.display(), e),
        })
    }
}
