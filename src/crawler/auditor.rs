//! Single page audit
//!
//! Drives one page through [`AuditState`] and turns every outcome, including
//! a failed fetch, into Issue rows.

use crate::config::AuditConfig;
use crate::crawler::checker::LinkChecker;
use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::crawler::links::{classify_links, LinkRef};
use crate::crawler::scanner::PlaceholderScanner;
use crate::crawler::scope::ContentScope;
use crate::crawler::snippet::{link_snippet, trim_snippet};
use crate::issue::{Issue, IssueType};
use crate::state::AuditState;
use crate::url::{HostLists, LinkClass};
use crate::ConfigError;
use std::sync::Arc;
use url::Url;

/// One page scheduled for audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    /// The URL exactly as given in the input; used as the report's `URL`
    pub label: String,

    /// Absolute URL that is fetched
    pub url: Url,
}

impl PageTarget {
    pub fn new(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            url,
        }
    }

    /// Target whose label is its absolute URL
    pub fn from_url(url: Url) -> Self {
        Self {
            label: url.to_string(),
            url,
        }
    }
}

/// What the page's own fetch produced
enum PageOutcome {
    Fetched(String),
    FetchFailed(Issue),
}

/// Runs every check for one page
pub struct PageAuditor {
    fetcher: Fetcher,
    checker: LinkChecker,
    scanner: PlaceholderScanner,
    hosts: Arc<HostLists>,
    snippet_limit: usize,
}

impl PageAuditor {
    pub fn new(config: &AuditConfig, fetcher: Fetcher) -> Result<Self, ConfigError> {
        let snippet_limit = config.scan.snippet_limit;
        Ok(Self {
            checker: LinkChecker::new(fetcher.clone(), snippet_limit),
            scanner: PlaceholderScanner::from_config(&config.scan)?,
            hosts: Arc::new(HostLists::from_config(&config.hosts)),
            fetcher,
            snippet_limit,
        })
    }

    /// Audits one page
    ///
    /// Issues come out as: the page's fetch issue (and nothing else), or
    /// legacy host links, restricted domain links, broken links and then
    /// placeholder text. Each group keeps document order.
    pub async fn audit(&self, target: &PageTarget) -> Vec<Issue> {
        let mut state = AuditState::Pending;
        advance(&mut state, AuditState::Fetching, target);

        match self.fetch(target).await {
            PageOutcome::FetchFailed(issue) => {
                advance(&mut state, AuditState::FetchFailed, target);
                tracing::warn!("{}: {} ({})", target.label, issue.issue_type, issue.snippet);
                advance(&mut state, AuditState::Done, target);
                vec![issue]
            }
            PageOutcome::Fetched(body) => {
                advance(&mut state, AuditState::Fetched, target);

                advance(&mut state, AuditState::Scoping, target);
                let scope = ContentScope::from_body(&body);

                advance(&mut state, AuditState::Checking, target);
                let mut issues = self.check_links(&scope, target).await;
                issues.extend(self.scanner.scan(&scope, &target.label));

                advance(&mut state, AuditState::Done, target);
                tracing::debug!("{}: {} issue(s)", target.label, issues.len());
                issues
            }
        }
    }

    async fn fetch(&self, target: &PageTarget) -> PageOutcome {
        let (issue_type, detail) = match self.fetcher.fetch(&target.url).await {
            FetchResult::Ok { body, .. } => return PageOutcome::Fetched(body),
            FetchResult::NotFound => (IssueType::Page404, "GET returned 404".to_string()),
            FetchResult::AuthFailure { status_code } => (
                IssueType::FetchFailed,
                format!("authentication failed (HTTP {})", status_code),
            ),
            FetchResult::NetworkError { detail } => (IssueType::FetchFailed, detail),
        };

        PageOutcome::FetchFailed(Issue::new(
            target.label.as_str(),
            issue_type,
            trim_snippet(&detail, self.snippet_limit),
        ))
    }

    /// Classifies every link in the scope and runs the matching check
    async fn check_links(&self, scope: &ContentScope, target: &PageTarget) -> Vec<Issue> {
        let links = classify_links(scope, &target.url, &self.hosts);
        let link_issue = |link: &LinkRef, issue_type: IssueType| {
            Issue::new(
                target.label.as_str(),
                issue_type,
                link_snippet(link, None, self.snippet_limit),
            )
        };

        let mut legacy = Vec::new();
        let mut restricted = Vec::new();
        let mut broken = Vec::new();

        for classified in &links {
            let link = &classified.link;
            match classified.class {
                LinkClass::LegacyHost => {
                    legacy.push(link_issue(link, IssueType::LegacyHostLink))
                }
                LinkClass::RestrictedLifelineDomain => {
                    restricted.push(link_issue(link, IssueType::RestrictedDomainLink))
                }
                LinkClass::InternalCheckable => {
                    broken.extend(self.checker.check(&target.label, link).await)
                }
                LinkClass::Ignored => {}
            }
        }

        legacy.extend(restricted);
        legacy.extend(broken);
        legacy
    }
}

fn advance(state: &mut AuditState, next: AuditState, target: &PageTarget) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal audit transition {} -> {}",
        state,
        next
    );
    tracing::trace!("{}: {} -> {}", target.label, state, next);
    *state = next;
}
