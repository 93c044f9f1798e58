//! Crawler module for page fetching and auditing
//!
//! This module contains the core audit logic, including:
//! - HTTP fetching with retry logic
//! - Main content scoping
//! - Link extraction, classification and probing
//! - Placeholder text scanning
//! - Per-page orchestration and the concurrent coordinator

mod auditor;
mod checker;
mod coordinator;
mod fetcher;
mod links;
mod scanner;
mod scope;
mod snippet;

pub use auditor::{PageAuditor, PageTarget};
pub use checker::LinkChecker;
pub use coordinator::{run_audit, Coordinator};
pub use fetcher::{build_http_client, FetchResult, Fetcher, ProbeResult, RetryPolicy};
pub use links::{classify_links, collapse_whitespace, extract_links, ClassifiedLink, LinkRef};
pub use scanner::{visible_text, PlaceholderScanner};
pub use scope::{ContentScope, MAIN_CONTENT_TAG};
pub use snippet::{link_snippet, text_window, trim_snippet};
