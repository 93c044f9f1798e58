//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the audit, including:
//! - Building the shared HTTP client
//! - Authenticated GET requests for audited pages
//! - HEAD (or fallback GET) probes for internal links
//! - Bounded retry for transient transport failures
//! - Status classification

use crate::config::{Credentials, HttpConfig};
use reqwest::{redirect::Policy, Client, Method, StatusCode};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Result of fetching an audited page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// 2xx response with its body
    Ok {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// HTTP 404
    NotFound,

    /// HTTP 401 or 403
    AuthFailure {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure, timeout, or any other non-2xx status
    NetworkError {
        /// Error description
        detail: String,
    },
}

/// Result of probing a linked URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The server answered with this status
    Status(u16),
    /// No usable answer after retries
    Failed(String),
}

/// How often and how patiently transient failures are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first
    pub max_retries: u32,
    /// Pause before each extra attempt
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Total number of attempts including the first
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

/// Outcome of a single attempt inside the retry loop
enum Attempt<T> {
    /// Final answer, retrying would not change it
    Done(T),
    /// Transient failure with its description
    Retry(String),
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use migration_audit::config::HttpConfig;
/// use migration_audit::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Authenticated fetcher shared by every worker
///
/// Cloning is cheap: the client and credentials are reference counted.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    credentials: Arc<Credentials>,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: Client, credentials: Arc<Credentials>, policy: RetryPolicy) -> Self {
        Self {
            client,
            credentials,
            policy,
        }
    }

    /// Builds a fetcher with its own client from the HTTP settings
    pub fn from_config(
        config: &HttpConfig,
        credentials: Arc<Credentials>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, credentials, RetryPolicy::from_config(config)))
    }

    /// Fetches an audited page
    ///
    /// # Retry Logic
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 2xx | `Ok` with the body |
    /// | HTTP 404 | `NotFound`, never retried |
    /// | HTTP 401 / 403 | `AuthFailure`, never retried |
    /// | Other status | `NetworkError("status N")`, never retried |
    /// | Timeout / connect / DNS | retried, then `NetworkError` |
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        match self.with_retry(url, || self.get_once(url)).await {
            Ok(result) => result,
            Err(detail) => FetchResult::NetworkError { detail },
        }
    }

    /// Checks that a linked URL exists
    ///
    /// Sends HEAD first. Servers that refuse HEAD (405 / 501) get one GET.
    pub async fn probe(&self, url: &Url) -> ProbeResult {
        let head = self
            .with_retry(url, || self.probe_once(Method::HEAD, url))
            .await;

        let outcome = match head {
            Ok(Ok(status)) if status == 405 || status == 501 => {
                tracing::debug!("HEAD not supported by {} ({}), retrying with GET", url, status);
                self.with_retry(url, || self.probe_once(Method::GET, url))
                    .await
            }
            other => other,
        };

        match outcome {
            Ok(Ok(status)) => ProbeResult::Status(status),
            Ok(Err(detail)) | Err(detail) => ProbeResult::Failed(detail),
        }
    }

    /// Runs `attempt` until it returns a final answer or the policy runs out
    ///
    /// Returns the last transient failure once every attempt is spent.
    async fn with_retry<T, F, Fut>(&self, url: &Url, mut attempt: F) -> Result<T, String>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let attempts = self.policy.attempts();
        let mut last_error = String::new();

        for n in 1..=attempts {
            if n > 1 {
                tokio::time::sleep(self.policy.backoff).await;
            }

            match attempt().await {
                Attempt::Done(value) => return Ok(value),
                Attempt::Retry(detail) => {
                    tracing::debug!(
                        "Attempt {}/{} for {} failed: {}",
                        n,
                        attempts,
                        url,
                        detail
                    );
                    last_error = detail;
                }
            }
        }

        Err(format!("{} (after {} attempts)", last_error, attempts))
    }

    async fn get_once(&self, url: &Url) -> Attempt<FetchResult> {
        let response = match self.request(Method::GET, url).send().await {
            Ok(r) => r,
            Err(e) => {
                return transport_failure(&e, |detail| FetchResult::NetworkError { detail });
            }
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Attempt::Done(FetchResult::NotFound);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Attempt::Done(FetchResult::AuthFailure {
                status_code: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Attempt::Done(FetchResult::NetworkError {
                detail: format!("status {}", status.as_u16()),
            });
        }

        match response.text().await {
            Ok(body) => Attempt::Done(FetchResult::Ok {
                status_code: status.as_u16(),
                body,
            }),
            Err(e) => transport_failure(&e, |detail| FetchResult::NetworkError { detail }),
        }
    }

    async fn probe_once(&self, method: Method, url: &Url) -> Attempt<Result<u16, String>> {
        match self.request(method, url).send().await {
            Ok(response) => Attempt::Done(Ok(response.status().as_u16())),
            Err(e) => transport_failure(&e, Err),
        }
    }

    fn request(&self, method: Method, url: &Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url.clone())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }
}

/// Splits transport errors into retryable and final
///
/// Timeouts and connection failures (refused, reset, DNS) are transient.
/// Anything else, such as a redirect loop, is final.
fn transport_failure<T>(error: &reqwest::Error, terminal: impl FnOnce(String) -> T) -> Attempt<T> {
    if error.is_timeout() {
        Attempt::Retry("request timed out".to_string())
    } else if error.is_connect() {
        Attempt::Retry(format!("connection failed: {}", error))
    } else if error.is_request() || error.is_body() {
        Attempt::Retry(format!("request error: {}", error))
    } else {
        Attempt::Done(terminal(error.to_string()))
    }
}
