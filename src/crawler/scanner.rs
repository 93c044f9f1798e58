//! Placeholder text scanner
//!
//! Searches the visible text of a content scope for leftover template copy.

use crate::config::ScanConfig;
use crate::crawler::links::collapse_whitespace;
use crate::crawler::scope::ContentScope;
use crate::crawler::snippet::{text_window, trim_snippet};
use crate::issue::{Issue, IssueType};
use crate::ConfigError;
use regex::Regex;
use scraper::ElementRef;

/// Elements whose content never renders as text
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Compiled placeholder patterns plus reporting limits
#[derive(Debug, Clone)]
pub struct PlaceholderScanner {
    patterns: Vec<Regex>,
    max_matches: usize,
    context_chars: usize,
    snippet_limit: usize,
}

impl PlaceholderScanner {
    /// Compiles the configured phrases into case-insensitive patterns
    ///
    /// Phrases match on word boundaries, so `placeholder` does not fire
    /// inside `placeholders`.
    pub fn from_config(config: &ScanConfig) -> Result<Self, ConfigError> {
        let patterns = config
            .placeholders
            .iter()
            .map(String::as_str)
            .map(phrase_pattern)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            max_matches: config.max_matches,
            context_chars: config.context_chars,
            snippet_limit: config.snippet_limit,
        })
    }

    /// Scans the visible text of `scope`, one Issue per match in text order
    pub fn scan(&self, scope: &ContentScope, page_url: &str) -> Vec<Issue> {
        let text = visible_text(scope);
        if text.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(usize, usize)> = self
            .patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(&text).map(|m| (m.start(), m.end())))
            .collect();
        matches.sort_unstable();

        if matches.len() > self.max_matches {
            tracing::debug!(
                "{}: {} placeholder matches, reporting the first {}",
                page_url,
                matches.len(),
                self.max_matches
            );
        }

        matches
            .into_iter()
            .take(self.max_matches)
            .map(|(start, end)| {
                let window = text_window(&text, start, end, self.context_chars);
                let snippet = format!("Found \"{}\" in \"{}\"", &text[start..end], window);
                Issue::new(
                    page_url,
                    IssueType::PlaceholderText,
                    trim_snippet(&snippet, self.snippet_limit),
                )
            })
            .collect()
    }
}

fn phrase_pattern(phrase: &str) -> Result<Regex, ConfigError> {
    let phrase = phrase.trim();
    let starts_word = phrase.chars().next().is_some_and(is_word_char);
    let ends_word = phrase.chars().last().is_some_and(is_word_char);

    let pattern = format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(phrase),
        if ends_word { r"\b" } else { "" },
    );

    Regex::new(&pattern).map_err(|e| {
        ConfigError::Validation(format!("Invalid placeholder phrase '{}': {}", phrase, e))
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whitespace-collapsed text of the scope, without script/style content
pub fn visible_text(scope: &ContentScope) -> String {
    let document = scope.parse();
    let mut pieces = Vec::new();
    collect_text(document.root_element(), &mut pieces);
    collapse_whitespace(&pieces.join(" "))
}

fn collect_text(element: ElementRef, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let text: &str = text;
            out.push(text.to_owned());
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !HIDDEN_TAGS.contains(&child_element.value().name()) {
                collect_text(child_element, out);
            }
        }
    }
}
