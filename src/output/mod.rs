//! Output module for writing audit reports
//!
//! This module handles:
//! - Writing the issue report as CSV
//! - Summarizing a run for the operator

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{write_csv_report, CsvReportWriter};
pub use stats::{print_statistics, RunStatistics};
pub use traits::{OutputError, OutputResult, ReportWriter, REPORT_COLUMNS};
