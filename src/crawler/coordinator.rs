//! Audit coordinator - runs the page audits for a whole input list
//!
//! This module owns the worker pool. It:
//! - Builds the shared fetcher, host lists and scanner once
//! - Audits pages concurrently under a fixed width
//! - Reassembles per-page results in input order
//! - Converts a crashed page task into an Issue for that page

use crate::config::{validate_concurrency, AuditConfig, Credentials};
use crate::crawler::auditor::{PageAuditor, PageTarget};
use crate::crawler::fetcher::Fetcher;
use crate::issue::{AuditReport, Issue, IssueType};
use crate::AuditError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Main audit coordinator structure
pub struct Coordinator {
    auditor: Arc<PageAuditor>,
    concurrency: usize,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// Fails only on configuration problems; nothing is fetched here.
    pub fn new(config: &AuditConfig, credentials: Credentials) -> Result<Self, AuditError> {
        validate_concurrency(config.crawler.concurrency)?;

        let fetcher = Fetcher::from_config(&config.http, Arc::new(credentials))?;
        let auditor = PageAuditor::new(config, fetcher)?;

        Ok(Self {
            auditor: Arc::new(auditor),
            concurrency: config.crawler.concurrency,
        })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Audits every target and returns the issues in input order
    ///
    /// At most `concurrency` pages are in flight at once. Each page runs to
    /// completion independently; the report is assembled by input index, so
    /// completion order never affects row order.
    pub async fn run(&self, targets: &[PageTarget]) -> AuditReport {
        let total = targets.len();
        let start_time = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        tracing::info!(
            "Auditing {} page(s) with {} worker(s)",
            total,
            self.concurrency
        );

        let handles: Vec<_> = targets
            .iter()
            .cloned()
            .enumerate()
            .map(|(idx, target)| {
                let auditor = Arc::clone(&self.auditor);
                let semaphore = Arc::clone(&semaphore);
                tokio::spawn(async move {
                    // never closed
                    let _permit = semaphore.acquire_owned().await.ok();
                    tracing::info!("[{}/{}] Auditing {}", idx + 1, total, target.label);
                    auditor.audit(&target).await
                })
            })
            .collect();

        // slot i always holds the issues of targets[i]
        let mut pages: Vec<Vec<Issue>> = Vec::with_capacity(total);
        for (handle, target) in handles.into_iter().zip(targets) {
            let issues = match handle.await {
                Ok(issues) => issues,
                Err(e) => {
                    tracing::error!("Audit task for {} aborted: {}", target.label, e);
                    vec![Issue::new(
                        target.label.as_str(),
                        IssueType::FetchFailed,
                        format!("audit aborted: {}", e),
                    )]
                }
            };
            pages.push(issues);
        }

        let report = AuditReport::from_pages(pages);
        tracing::info!(
            "Audit completed: {} page(s), {} issue(s) in {:?}",
            report.pages_audited(),
            report.len(),
            start_time.elapsed()
        );
        report
    }
}

/// Runs a complete audit
///
/// # Example
///
/// ```no_run
/// use migration_audit::config::{AuditConfig, Credentials};
/// use migration_audit::crawler::{run_audit, PageTarget};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let targets = vec![PageTarget::from_url(Url::parse("https://example.org/about")?)];
/// let report = run_audit(&AuditConfig::default(), Credentials::from_env()?, &targets).await?;
/// println!("{} issue(s)", report.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_audit(
    config: &AuditConfig,
    credentials: Credentials,
    targets: &[PageTarget],
) -> Result<AuditReport, AuditError> {
    let coordinator = Coordinator::new(config, credentials)?;
    Ok(coordinator.run(targets).await)
}
