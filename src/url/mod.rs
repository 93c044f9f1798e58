//! URL handling module for Migration-Audit
//!
//! This module provides href resolution, host extraction, and the link
//! classification rules that decide which checks a link receives.

mod domain;
mod resolve;

use crate::config::HostConfig;
use std::collections::HashSet;
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, same_site};
pub use resolve::{is_web_scheme, resolve_href, ResolvedHref};

/// Classification bucket for a discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Absolute link to an old deployment host
    LegacyHost,
    /// Link to a retired site host
    RestrictedLifelineDomain,
    /// Link back into the audited site; gets an existence probe
    InternalCheckable,
    /// Anything else: external sites, mailto/tel, same-page anchors
    Ignored,
}

impl fmt::Display for LinkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LegacyHost => "legacy_host",
            Self::RestrictedLifelineDomain => "restricted_domain",
            Self::InternalCheckable => "internal",
            Self::Ignored => "ignored",
        };
        f.write_str(name)
    }
}

/// Immutable host lists used for classification
///
/// Built once at startup and shared by every worker.
#[derive(Debug, Clone, Default)]
pub struct HostLists {
    legacy: HashSet<String>,
    restricted: HashSet<String>,
    exempt_prefixes: Vec<String>,
}

impl HostLists {
    pub fn new<L, R, E>(legacy: L, restricted: R, exempt_prefixes: E) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            legacy: legacy.into_iter().map(|h| h.as_ref().to_lowercase()).collect(),
            restricted: restricted
                .into_iter()
                .map(|h| h.as_ref().to_lowercase())
                .collect(),
            exempt_prefixes: exempt_prefixes
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(&config.legacy, &config.restricted, &config.exempt_prefixes)
    }

    /// Classifies a resolved link found on `page_url`
    ///
    /// Rules are checked in this order, first match wins:
    /// 1. Same-page anchors and non-http(s) schemes are ignored
    /// 2. Legacy deployment host (exact match)
    /// 3. Restricted host (exact match, unless the leading label is exempt)
    /// 4. Same host and port as the page: internal
    /// 5. Everything else is ignored
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use migration_audit::url::{HostLists, LinkClass};
    ///
    /// let hosts = HostLists::new(["old.example.net"], ["www.example.com"], ["give"]);
    /// let page = Url::parse("https://example.org/about").unwrap();
    /// let link = Url::parse("https://old.example.net/x").unwrap();
    /// assert_eq!(hosts.classify(&link, false, &page), LinkClass::LegacyHost);
    /// ```
    pub fn classify(&self, url: &Url, fragment_only: bool, page_url: &Url) -> LinkClass {
        if fragment_only || !is_web_scheme(url) {
            return LinkClass::Ignored;
        }

        let host = match extract_domain(url) {
            Some(h) => h,
            None => return LinkClass::Ignored,
        };

        if self.is_legacy(&host) {
            return LinkClass::LegacyHost;
        }

        if self.is_restricted(&host) {
            return LinkClass::RestrictedLifelineDomain;
        }

        if same_site(url, page_url) {
            return LinkClass::InternalCheckable;
        }

        LinkClass::Ignored
    }

    /// Returns true if `host` is a legacy deployment host
    pub fn is_legacy(&self, host: &str) -> bool {
        self.legacy.contains(host)
    }

    /// Returns true if `host` is restricted and not exempt
    pub fn is_restricted(&self, host: &str) -> bool {
        if self.is_exempt(host) {
            return false;
        }
        self.restricted.contains(host)
    }

    fn is_exempt(&self, host: &str) -> bool {
        let first_label = host.split('.').next().unwrap_or_default();
        self.exempt_prefixes.iter().any(|p| p == first_label)
    }
}
