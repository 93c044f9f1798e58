use serde::Deserialize;

/// Main configuration structure for Migration-Audit
///
/// Every table is optional in the TOML file; omitted tables and keys fall back
/// to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub hosts: HostConfig,
    pub scan: ScanConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages audited at the same time
    pub concurrency: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self { concurrency: 5 }
    }
}

/// HTTP behaviour shared by page fetches and link probes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Connection establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: u64,

    /// Extra attempts after a timeout or connection failure
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay before each retry (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            max_retries: 2,
            retry_backoff_ms: 500,
            user_agent: format!("migration-audit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Host lists used by link classification
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Old deployment hosts that must never be linked absolutely
    pub legacy: Vec<String>,

    /// Retired site hosts (exact match)
    pub restricted: Vec<String>,

    /// Leading host labels that are never treated as restricted (e.g. "give")
    #[serde(rename = "exempt-prefixes")]
    pub exempt_prefixes: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            legacy: vec![
                "lla-drupal-app-prod.salmonground-819df123.australiaeast.azurecontainerapps.io"
                    .to_string(),
                "lla-drupal-app-uat.victoriouspond-08331c17.australiaeast.azurecontainerapps.io"
                    .to_string(),
            ],
            restricted: vec![
                "lifeline.org.au".to_string(),
                "www.lifeline.org.au".to_string(),
                "toolkit.lifeline.org.au".to_string(),
            ],
            exempt_prefixes: vec!["give".to_string()],
        }
    }
}

/// Placeholder text scanning configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Phrases matched case-insensitively on word boundaries
    pub placeholders: Vec<String>,

    /// Maximum placeholder issues reported for one page
    #[serde(rename = "max-matches")]
    pub max_matches: usize,

    /// Characters of surrounding text kept on each side of a match
    #[serde(rename = "context-chars")]
    pub context_chars: usize,

    /// Maximum length of any snippet in the report
    #[serde(rename = "snippet-limit")]
    pub snippet_limit: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            placeholders: vec!["lorem ipsum".to_string(), "placeholder".to_string()],
            max_matches: 20,
            context_chars: 80,
            snippet_limit: 200,
        }
    }
}
