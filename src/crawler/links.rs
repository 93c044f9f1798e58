//! Link extraction
//!
//! Enumerates anchors inside a content scope, resolves them against the page
//! URL and attaches the classification each link will be checked under.

use crate::crawler::scope::ContentScope;
use crate::url::{resolve_href, HostLists, LinkClass};
use scraper::{ElementRef, Selector};
use url::Url;

/// A hyperlink discovered inside a page's content scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// The href attribute exactly as written (trimmed)
    pub raw_href: String,

    /// Absolute URL, fragment removed
    pub url: Url,

    /// Whitespace-collapsed anchor text
    pub anchor_text: String,

    /// True for same-page `#fragment` links
    pub fragment_only: bool,

    /// The page the link was found on
    pub source: Url,
}

impl LinkRef {
    /// Classifies this link against the configured host lists
    pub fn classify(&self, hosts: &HostLists) -> LinkClass {
        hosts.classify(&self.url, self.fragment_only, &self.source)
    }
}

/// A link together with its class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    pub link: LinkRef,
    pub class: LinkClass,
}

/// Extracts every `<a href>` in the scope, in document order
///
/// Anchors without an href, and hrefs that cannot be resolved, produce no
/// `LinkRef`.
pub fn extract_links(scope: &ContentScope, page_url: &Url) -> Vec<LinkRef> {
    let document = scope.parse();
    let mut links = Vec::new();

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return links,
    };

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };

        if let Some(resolved) = resolve_href(href, page_url) {
            links.push(LinkRef {
                raw_href: href.to_string(),
                url: resolved.url,
                anchor_text: anchor_text(&element),
                fragment_only: resolved.fragment_only,
                source: page_url.clone(),
            });
        }
    }

    links
}

/// Extracts and classifies links in one pass
pub fn classify_links(
    scope: &ContentScope,
    page_url: &Url,
    hosts: &HostLists,
) -> Vec<ClassifiedLink> {
    extract_links(scope, page_url)
        .into_iter()
        .map(|link| {
            let class = link.classify(hosts);
            tracing::trace!("{} -> {}", link.url, class);
            ClassifiedLink { link, class }
        })
        .collect()
}

fn anchor_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Collapses runs of whitespace to single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
