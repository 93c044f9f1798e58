use url::Url;

/// An href resolved against the page it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHref {
    /// Absolute URL with any fragment removed
    pub url: Url,

    /// True when the href was nothing but `#fragment` (same-page anchor)
    pub fragment_only: bool,
}

/// Resolves an href to absolute form against `base_url`
///
/// Returns None for blank hrefs and hrefs that cannot be joined onto the base.
/// Non-http(s) schemes (`mailto:`, `tel:`, `javascript:` ...) are still
/// resolved; classification decides what to do with them.
///
/// Protocol-relative hrefs (`//host/path`) are given `https:`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use migration_audit::url::resolve_href;
///
/// let base = Url::parse("https://example.org/news/item").unwrap();
/// let resolved = resolve_href("../about#team", &base).unwrap();
/// assert_eq!(resolved.url.as_str(), "https://example.org/about");
/// assert!(!resolved.fragment_only);
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<ResolvedHref> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let fragment_only = href.starts_with('#');

    let joined = if href.starts_with("//") {
        Url::parse(&format!("https:{}", href))
    } else {
        base_url.join(href)
    };

    match joined {
        Ok(mut url) => {
            url.set_fragment(None);
            Some(ResolvedHref { url, fragment_only })
        }
        Err(e) => {
            tracing::debug!("Skipping unresolvable href '{}': {}", href, e);
            None
        }
    }
}

/// Returns true for schemes the link checks care about
pub fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
