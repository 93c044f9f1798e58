//! Internal link checker

use crate::crawler::fetcher::{Fetcher, ProbeResult};
use crate::crawler::links::LinkRef;
use crate::crawler::snippet::link_snippet;
use crate::issue::{Issue, IssueType};

/// Probes internal links and reports the ones that do not resolve
///
/// Every call probes; repeated links on one page are probed repeatedly.
#[derive(Clone)]
pub struct LinkChecker {
    fetcher: Fetcher,
    snippet_limit: usize,
}

impl LinkChecker {
    pub fn new(fetcher: Fetcher, snippet_limit: usize) -> Self {
        Self {
            fetcher,
            snippet_limit,
        }
    }

    /// Probes `link` and returns a `Broken link` issue on 4xx/5xx or failure
    ///
    /// `page_url` is the page label used in the report row.
    pub async fn check(&self, page_url: &str, link: &LinkRef) -> Option<Issue> {
        let extra = match self.fetcher.probe(&link.url).await {
            ProbeResult::Status(status) if status >= 400 => {
                tracing::debug!("{}: broken link {} ({})", page_url, link.url, status);
                format!("returned HTTP {}", status)
            }
            ProbeResult::Status(_) => return None,
            ProbeResult::Failed(detail) => {
                tracing::debug!("{}: probe of {} failed: {}", page_url, link.url, detail);
                format!("request failed: {}", detail)
            }
        };

        Some(Issue::new(
            page_url,
            IssueType::BrokenLink,
            link_snippet(link, Some(&extra), self.snippet_limit),
        ))
    }
}
