//! Main content scoping
//!
//! Narrows a fetched page to its `<main>` element so navigation, footers and
//! other shared chrome do not produce duplicate findings on every page.

use scraper::{Html, Selector};

/// Tag of the element treated as the page's main content
pub const MAIN_CONTENT_TAG: &str = "main";

/// The part of a page body that gets inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentScope {
    html: String,
    from_main: bool,
}

impl ContentScope {
    /// Scopes a raw page body
    ///
    /// Uses the inner markup of the first `<main>` element. When the page has
    /// no such element the whole body is kept, so nothing is silently skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use migration_audit::crawler::ContentScope;
    ///
    /// let scope = ContentScope::from_body("<nav>menu</nav><main><p>Hello</p></main>");
    /// assert!(scope.is_main_content());
    /// assert_eq!(scope.html(), "<p>Hello</p>");
    /// ```
    pub fn from_body(body: &str) -> Self {
        let document = Html::parse_document(body);

        let main = Selector::parse(MAIN_CONTENT_TAG)
            .ok()
            .and_then(|selector| document.select(&selector).next().map(|m| m.inner_html()));

        match main {
            Some(html) => Self {
                html,
                from_main: true,
            },
            None => {
                tracing::trace!("No <{}> element, scoping to whole body", MAIN_CONTENT_TAG);
                Self {
                    html: body.to_string(),
                    from_main: false,
                }
            }
        }
    }

    /// Serialized markup of the scope
    pub fn html(&self) -> &str {
        &self.html
    }

    /// True when the scope came from a `<main>` element
    pub fn is_main_content(&self) -> bool {
        self.from_main
    }

    /// Parses the scope for link extraction and text scanning
    pub fn parse(&self) -> Html {
        if self.from_main {
            Html::parse_fragment(&self.html)
        } else {
            Html::parse_document(&self.html)
        }
    }
}
