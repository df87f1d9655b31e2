//! Report rendering port trait.

use crate::domain::engine::PickReport;
use crate::domain::error::PickError;
use std::path::Path;

/// Port for rendering a finished pick run.
pub trait ReportPort {
    /// Write the report to `output_path`, or to stdout when `None`.
    fn write(&self, report: &PickReport, output_path: Option<&Path>) -> Result<(), PickError>;
}
