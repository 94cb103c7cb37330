//! Turn SearXNG response bodies into [`SearchOutcome`]s
//!
//! SearXNG can answer in JSON (`format=json`) or, on instances that disable
//! the JSON API, only with the rendered results page (`format=html`). Both
//! paths end in the same per-category [`SearchRecord`](crate::types::SearchRecord)s.

pub mod html;
pub mod json;

use regex::Regex;
use std::sync::LazyLock;

use crate::category::Category;
use crate::config::ResponseFormat;
use crate::error::SearchError;
use crate::types::SearchOutcome;

static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

/// Parse a response body in the given format
pub fn parse_body(
    body: &str,
    format: ResponseFormat,
    category: Category,
) -> Result<SearchOutcome, SearchError> {
    match format {
        ResponseFormat::Json => json::parse_results(body, category),
        ResponseFormat::Html => html::parse_results(body, category),
    }
}

/// Hashtags mentioned in a post, without the leading `#`
pub(crate) fn hashtags(content: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// Collapse runs of whitespace into single spaces and trim
pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `Some(s)` unless `s` is blank
pub(crate) fn non_empty(s: impl Into<String>) -> Option<String> {
    let s = s.into();
    if s.trim().is_empty() {
        None
    } else {
        Some(s.trim().to_string())
    }
}

/// Format a byte count the way SearXNG renders torrent sizes
pub(crate) fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
