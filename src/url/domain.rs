use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use migration_audit::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs point at the same host and port
///
/// The scheme is ignored so an `http://` link on an `https://` page still
/// counts as internal.
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(host_a), Some(host_b)) => {
            host_a == host_b && effective_port(a) == effective_port(b)
        }
        _ => false,
    }
}

// Treat the default http and https ports as one so scheme changes do not
// split a site in two.
fn effective_port(url: &Url) -> Option<u16> {
    match url.port() {
        Some(80) | Some(443) | None => None,
        other => other,
    }
}
