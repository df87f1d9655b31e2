//! Port traits at the seams between the engine and its collaborators.

pub mod config_port;
pub mod data_port;
pub mod state_port;
pub mod report_port;
