//! CSV report output

use crate::issue::AuditReport;
use crate::output::traits::{OutputResult, ReportWriter, REPORT_COLUMNS};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the report as `URL,Issue Type,Snippet` rows
pub struct CsvReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvReportWriter<File> {
    /// Creates (or truncates) the report file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvReportWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}

impl<W: Write> ReportWriter for CsvReportWriter<W> {
    fn write_report(&mut self, report: &AuditReport) -> OutputResult<()> {
        self.writer.write_record(REPORT_COLUMNS)?;

        for issue in report.issues() {
            self.writer.write_record([
                issue.page_url.as_str(),
                issue.issue_type.label(),
                issue.snippet.as_str(),
            ])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Writes `report` to `path`, replacing any previous file
pub fn write_csv_report(path: &Path, report: &AuditReport) -> OutputResult<()> {
    let mut writer = CsvReportWriter::create(path)?;
    writer.write_report(report)?;
    tracing::info!("Wrote {} issue(s) to {}", report.len(), path.display());
    Ok(())
}
