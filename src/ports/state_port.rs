//! Run-state persistence port trait.

use crate::domain::error::PickError;
use crate::domain::run_state::RunState;

pub trait RunStatePort {
    /// Never fails: missing or corrupt state degrades to the empty
    /// default so a broken state file cannot block a run.
    fn load(&self) -> RunState;

    /// Overwrites the stored state wholesale, atomically.
    fn save(&self, state: &RunState) -> Result<(), PickError>;
}
