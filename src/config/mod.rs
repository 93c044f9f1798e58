//! Configuration module for Migration-Audit
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, plus the credentials and base URL read from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use migration_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("Auditing {} pages at a time", config.crawler.concurrency);
//! ```

mod env;
mod parser;
mod types;
mod validation;

// Re-export types
pub use env::{base_url_from_env, load_dotenv, load_env_file, normalize_base_url, Credentials};
pub use types::{AuditConfig, CrawlerConfig, HostConfig, HttpConfig, ScanConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_concurrency};
