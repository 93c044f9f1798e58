//! Output handler traits and errors
//!
//! This module defines the interface report writers implement.

use crate::issue::AuditReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Column headers of the report, in order
pub const REPORT_COLUMNS: [&str; 3] = ["URL", "Issue Type", "Snippet"];

/// Trait for report writers
///
/// A writer receives the complete report once, after every page is audited.
pub trait ReportWriter {
    /// Writes every issue in `report`, in report order
    ///
    /// An empty report still produces a valid (header-only) output.
    fn write_report(&mut self, report: &AuditReport) -> OutputResult<()>;
}
