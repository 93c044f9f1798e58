use crate::config::types::{AuditConfig, CrawlerConfig, HostConfig, HttpConfig, ScanConfig};
use crate::ConfigError;
use std::collections::HashSet;

/// Validates the entire configuration
pub fn validate(config: &AuditConfig) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_host_config(&config.hosts)?;
    validate_scan_config(&config.scan)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_concurrency(config.concurrency)
}

/// Checks a worker pool width (also used for the `--concurrency` override)
pub fn validate_concurrency(concurrency: usize) -> Result<(), ConfigError> {
    if !(1..=100).contains(&concurrency) {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            concurrency
        )));
    }
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout-ms must be greater than 0".to_string(),
        ));
    }

    if config.connect_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-ms must be greater than 0".to_string(),
        ));
    }

    if config.max_retries > 5 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be at most 5, got {}",
            config.max_retries
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_host_config(config: &HostConfig) -> Result<(), ConfigError> {
    for host in config.legacy.iter().chain(config.restricted.iter()) {
        validate_domain_string(host)?;
    }

    for prefix in &config.exempt_prefixes {
        if prefix.is_empty()
            || !prefix.chars().all(|c| c.is_alphanumeric() || c == '-')
        {
            return Err(ConfigError::InvalidPattern(format!(
                "Exempt prefix '{}' must be a single host label",
                prefix
            )));
        }
    }

    // Legacy hosts win over restricted ones during classification, so an
    // overlap would silently hide a restricted host.
    let legacy: HashSet<String> = config.legacy.iter().map(|h| h.to_lowercase()).collect();
    if let Some(shared) = config
        .restricted
        .iter()
        .find(|h| legacy.contains(&h.to_lowercase()))
    {
        return Err(ConfigError::Validation(format!(
            "Host '{}' appears in both the legacy and restricted lists",
            shared
        )));
    }

    Ok(())
}

fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.placeholders.is_empty() {
        return Err(ConfigError::Validation(
            "at least one placeholder phrase is required".to_string(),
        ));
    }

    if config.placeholders.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "placeholder phrases cannot be empty".to_string(),
        ));
    }

    if config.max_matches == 0 {
        return Err(ConfigError::Validation(
            "max-matches must be at least 1".to_string(),
        ));
    }

    if config.snippet_limit < 20 {
        return Err(ConfigError::Validation(format!(
            "snippet-limit must be at least 20, got {}",
            config.snippet_limit
        )));
    }

    Ok(())
}

/// Validates a bare host name
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Host cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Host '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Host '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Host '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Host '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
