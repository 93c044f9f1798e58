//! Input module for loading the list of pages to audit
//!
//! Reads a CSV export with a header row. The URL column is found by name;
//! every other column is ignored.

use crate::crawler::PageTarget;
use crate::InputError;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use url::Url;

/// Header names accepted as the URL column, in order of preference
pub const URL_COLUMN_CANDIDATES: &[&str] = &[
    "link",
    "url",
    "full-link",
    "full link",
    "page url",
    "page-url",
];

/// Loads page targets from a CSV file
///
/// # Arguments
///
/// * `path` - CSV file with a header row
/// * `base_url` - Base for relative rows such as `/about`
/// * `limit` - Keep only the first N non-blank rows (`0` means no limit)
pub fn load_targets(
    path: &Path,
    base_url: Option<&Url>,
    limit: Option<usize>,
) -> Result<Vec<PageTarget>, InputError> {
    let file = File::open(path)?;
    read_targets(file, base_url, limit)
}

/// Reads page targets from any CSV source
pub fn read_targets<R: Read>(
    reader: R,
    base_url: Option<&Url>,
    limit: Option<usize>,
) -> Result<Vec<PageTarget>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let column = find_url_column(reader.headers()?).ok_or(InputError::MissingUrlColumn)?;
    let limit = limit.filter(|&n| n > 0).unwrap_or(usize::MAX);
    let mut targets = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        if targets.len() >= limit {
            break;
        }

        let record = record?;
        let raw = record.get(column).map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            continue;
        }

        // line 1 is the header
        let row = idx + 2;
        let url = absolutize_url(raw, base_url, row)?;
        targets.push(PageTarget::new(raw, url));
    }

    Ok(targets)
}

/// Locates the URL column in a header row
///
/// Exact candidate names win; otherwise the first header containing `url` or
/// `link` is used. Matching is case-insensitive and ignores a UTF-8 BOM.
pub fn find_url_column(headers: &StringRecord) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

    URL_COLUMN_CANDIDATES
        .iter()
        .find_map(|candidate| normalized.iter().position(|h| h == candidate))
        .or_else(|| {
            normalized
                .iter()
                .position(|h| h.contains("url") || h.contains("link"))
        })
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Turns an input cell into an absolute fetch URL
///
/// - `http(s)://...` is kept as is
/// - `//host/path` gets `https:`
/// - anything else is joined onto `base_url` (leading `/` dropped so the
///   base URL's own path is kept)
pub fn absolutize_url(raw: &str, base_url: Option<&Url>, row: usize) -> Result<Url, InputError> {
    let invalid = |message: String| InputError::InvalidUrl {
        row,
        url: raw.to_string(),
        message,
    };

    if let Some(rest) = raw.strip_prefix("//") {
        return Url::parse(&format!("https://{}", rest)).map_err(|e| invalid(e.to_string()));
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        Ok(url) => Err(invalid(format!("unsupported scheme '{}'", url.scheme()))),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base_url.ok_or_else(|| InputError::RelativeWithoutBase {
                row,
                url: raw.to_string(),
            })?;
            base.join(raw.trim_start_matches('/'))
                .map_err(|e| invalid(e.to_string()))
        }
        Err(e) => Err(invalid(e.to_string())),
    }
}
