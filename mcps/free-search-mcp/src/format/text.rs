//! Plain text rendering

use std::fmt::Write;

use super::details;
use crate::extract::squash_whitespace;
use crate::types::SearchRecord;

/// Numbered entries separated by blank lines
pub(super) fn render(records: &[SearchRecord]) -> String {
    let mut out = String::new();

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        // Entries are delimited by blank lines, so every field is one line
        let title = squash_whitespace(&record.title);
        let title = if title.is_empty() { record.url.as_str() } else { title.as_str() };
        let _ = writeln!(out, "{}. {}", i + 1, title);
        let _ = writeln!(out, "   URL: {}", record.url);
        let content = squash_whitespace(&record.content);
        if !content.is_empty() {
            let _ = writeln!(out, "   {}", content);
        }
        for (label, value) in details(&record.kind) {
            let _ = writeln!(out, "   {}: {}", label, squash_whitespace(&value));
        }
        if !record.engines.is_empty() {
            let _ = writeln!(out, "   Engines: {}", record.engines.join(", "));
        }
    }

    out.truncate(out.trim_end().len());
    out
}
