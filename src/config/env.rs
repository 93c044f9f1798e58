use crate::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the Basic auth user name
pub const USERNAME_VAR: &str = "HTTP_USERNAME";

/// Environment variable holding the Basic auth password
pub const PASSWORD_VAR: &str = "HTTP_PASSWORD";

/// Environment variable holding the base URL for relative input rows
pub const BASE_URL_VAR: &str = "BASE_URL";

/// Optional env file read from the working directory at startup
pub const ENV_FILE: &str = ".env";

/// Loads `.env` from the working directory into the process environment
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    load_env_file(Path::new(ENV_FILE))
}

/// Loads `KEY=value` lines from `path` into the process environment
///
/// Variables already set in the environment are left untouched. Returns
/// `Ok(None)` when the file does not exist.
pub fn load_env_file(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::EnvFile(format!("{}: {}", path.display(), e))),
    }
}

/// HTTP Basic credentials shared read-only by every worker
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads the credential pair from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the credential pair through `lookup`; blank values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = required(&lookup, USERNAME_VAR)?;
        let password = required(&lookup, PASSWORD_VAR)?;
        Ok(Self { username, password })
    }
}

// Never print the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
}

/// Reads and normalizes `BASE_URL` from the process environment
pub fn base_url_from_env() -> Result<Option<Url>, ConfigError> {
    normalize_base_url(std::env::var(BASE_URL_VAR).ok().as_deref())
}

/// Normalizes an optional base URL
///
/// Blank values mean "no base URL". Anything else must be http(s) with a host
/// and gains a trailing `/` so relative paths join underneath it.
pub fn normalize_base_url(value: Option<&str>) -> Result<Option<Url>, ConfigError> {
    let trimmed = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    let mut url = Url::parse(trimmed).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "{} must include a scheme and hostname, e.g. https://example.com ({})",
            BASE_URL_VAR, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must include a scheme and hostname, e.g. https://example.com",
            BASE_URL_VAR
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(Some(url))
}
