//! Issue records and the per-run report
//!
//! An [`Issue`] is one reportable defect on one page. Issues are never merged
//! or deduplicated: two identical broken links on a page are two rows.

use std::collections::BTreeMap;
use std::fmt;

/// Closed set of issue kinds that can appear in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueType {
    /// The audited page itself returned 404
    Page404,
    /// The audited page could not be fetched (auth, network, other status)
    FetchFailed,
    /// An internal link probe returned an error status or failed
    BrokenLink,
    /// Absolute link to an old deployment host
    LegacyHostLink,
    /// Link to a retired site host
    RestrictedDomainLink,
    /// Placeholder copy found in the page's main content
    PlaceholderText,
}

impl IssueType {
    /// The label written to the `Issue Type` column
    pub fn label(&self) -> &'static str {
        match self {
            Self::Page404 => "Page 404",
            Self::FetchFailed => "Fetch failed",
            Self::BrokenLink => "Broken link",
            Self::LegacyHostLink => "Absolute link to dev/prod domain",
            Self::RestrictedDomainLink => "Link to lifeline.org.au",
            Self::PlaceholderText => "Placeholder text",
        }
    }

    /// Returns all issue types in report column order
    pub fn all() -> [Self; 6] {
        [
            Self::Page404,
            Self::FetchFailed,
            Self::BrokenLink,
            Self::LegacyHostLink,
            Self::RestrictedDomainLink,
            Self::PlaceholderText,
        ]
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// The page URL exactly as it appeared in the input
    pub page_url: String,
    pub issue_type: IssueType,
    /// Bounded human-readable excerpt
    pub snippet: String,
}

impl Issue {
    pub fn new(
        page_url: impl Into<String>,
        issue_type: IssueType,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            page_url: page_url.into(),
            issue_type,
            snippet: snippet.into(),
        }
    }
}

/// Ordered issues produced by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    issues: Vec<Issue>,
    pages_audited: usize,
    pages_with_issues: usize,
}

impl AuditReport {
    /// Builds a report from per-page issue lists already in input order
    pub fn from_pages(pages: Vec<Vec<Issue>>) -> Self {
        let pages_audited = pages.len();
        let pages_with_issues = pages.iter().filter(|issues| !issues.is_empty()).count();
        let issues = pages.into_iter().flatten().collect();
        Self {
            issues,
            pages_audited,
            pages_with_issues,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of pages that were audited (with or without issues)
    pub fn pages_audited(&self) -> usize {
        self.pages_audited
    }

    /// Issue totals by type
    pub fn counts_by_type(&self) -> BTreeMap<IssueType, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.issue_type).or_insert(0) += 1;
        }
        counts
    }

    /// Number of audited pages with at least one issue
    ///
    /// Counted per input row, so a URL listed twice counts twice.
    pub fn pages_with_issues(&self) -> usize {
        self.pages_with_issues
    }
}
