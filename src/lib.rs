//! Migration-Audit: residual defect finder for migrated sites
//!
//! This crate fetches a fixed list of migrated pages, narrows each one to its
//! main content, and reports dead pages, broken internal links, links to
//! legacy deployment hosts, links to retired domains, and leftover
//! placeholder copy.

pub mod config;
pub mod crawler;
pub mod input;
pub mod issue;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Migration-Audit operations
///
/// Only run-level failures live here. Anything that goes wrong while auditing
/// a single page is reported as an [`issue::Issue`] instead.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid host pattern: {0}")]
    InvalidPattern(String),

    #[error("Environment variable {0} is required")]
    MissingEnv(String),

    #[error("Failed to read env file {0}")]
    EnvFile(String),
}

/// Errors raised while loading the page list
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("No URL column found in header (looked for a column named like 'url' or 'link')")]
    MissingUrlColumn,

    #[error("Row {row}: '{url}' is relative but BASE_URL is not set")]
    RelativeWithoutBase { row: usize, url: String },

    #[error("Row {row}: '{url}' is not a valid URL: {message}")]
    InvalidUrl {
        row: usize,
        url: String,
        message: String,
    },
}

/// Result type alias for Migration-Audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{AuditConfig, Credentials};
pub use crawler::{Coordinator, PageTarget};
pub use issue::{AuditReport, Issue, IssueType};
pub use state::AuditState;
pub use url::{HostLists, LinkClass};
