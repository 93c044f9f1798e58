//! Run statistics
//!
//! This module summarizes a finished audit for the operator.

use crate::issue::{AuditReport, IssueType};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Audit run statistics summary
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the audit started
    pub started_at: DateTime<Utc>,

    /// When the audit finished
    pub finished_at: DateTime<Utc>,

    /// Number of pages audited
    pub pages_audited: usize,

    /// Number of pages with at least one issue
    pub pages_with_issues: usize,

    /// Total number of issues
    pub total_issues: usize,

    /// Issue count by type (types with no issues are omitted)
    pub issues_by_type: BTreeMap<IssueType, usize>,
}

impl RunStatistics {
    /// Builds statistics for `report`
    pub fn from_report(
        report: &AuditReport,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            started_at,
            finished_at,
            pages_audited: report.pages_audited(),
            pages_with_issues: report.pages_with_issues(),
            total_issues: report.len(),
            issues_by_type: report.counts_by_type(),
        }
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Percentage of audited pages without any issue
    pub fn clean_rate(&self) -> f64 {
        if self.pages_audited == 0 {
            return 0.0;
        }
        let clean = self.pages_audited - self.pages_with_issues;
        (clean as f64 / self.pages_audited as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Audit Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Duration: {}s", stats.duration_seconds());
    println!("  Pages audited: {}", stats.pages_audited);
    println!("  Pages with issues: {}", stats.pages_with_issues);
    println!("  Total issues: {}", stats.total_issues);
    println!();

    if !stats.issues_by_type.is_empty() {
        println!("Issues by Type:");
        for issue_type in IssueType::all() {
            if let Some(count) = stats.issues_by_type.get(&issue_type) {
                println!("  {}: {}", issue_type, count);
            }
        }
        println!();
    }

    println!(
        "Clean Rate: {:.1}% ({} / {} pages without issues)",
        stats.clean_rate(),
        stats.pages_audited - stats.pages_with_issues,
        stats.pages_audited
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use chrono::Duration;

    fn sample_report() -> AuditReport {
        AuditReport::from_pages(vec![
            vec![Issue::new("/a", IssueType::Page404, "GET returned 404")],
            vec![],
            vec![],
            vec![
                Issue::new("/d", IssueType::BrokenLink, "x"),
                Issue::new("/d", IssueType::BrokenLink, "y"),
            ],
        ])
    }

    #[test]
    fn test_from_report() {
        let start = Utc::now();
        let finish = start + Duration::seconds(12);
        let stats = RunStatistics::from_report(&sample_report(), start, finish);

        assert_eq!(stats.pages_audited, 4);
        assert_eq!(stats.pages_with_issues, 2);
        assert_eq!(stats.total_issues, 3);
        assert_eq!(stats.issues_by_type.get(&IssueType::BrokenLink), Some(&2));
        assert_eq!(stats.duration_seconds(), 12);
    }

    #[test]
    fn test_clean_rate() {
        let now = Utc::now();
        let stats = RunStatistics::from_report(&sample_report(), now, now);
        assert!((stats.clean_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_clean_rate_zero_pages() {
        let now = Utc::now();
        let stats = RunStatistics::from_report(&AuditReport::default(), now, now);
        assert_eq!(stats.clean_rate(), 0.0);
    }
}
