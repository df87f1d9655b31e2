//! Concrete port implementations.

pub mod file_config_adapter;
pub mod csv_data_adapter;
pub mod json_data_adapter;
pub mod json_state_adapter;
pub mod text_report_adapter;
