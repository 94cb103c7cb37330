//! HTML fragment rendering

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use super::details;
use crate::types::{RecordKind, SearchRecord};

/// One `<div>` per record, joined by newlines
pub(super) fn render(records: &[SearchRecord]) -> String {
    records.iter().map(render_record).collect::<Vec<_>>().join("\n")
}

fn render_record(record: &SearchRecord) -> String {
    let url = encode_double_quoted_attribute(&record.url);
    let title = encode_text(&record.title);

    let mut html = String::from(
        "<div style=\"margin-bottom: 1.5em; border-left: 3px solid #007acc; padding-left: 15px;\">",
    );
    let _ = write!(
        html,
        "<h3><a href=\"{}\" target=\"_blank\" style=\"color: #007acc; text-decoration: none;\">{}</a></h3>",
        url, title
    );

    if let Some(src) = thumbnail(&record.kind) {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"{}\" style=\"max-width: 200px; max-height: 200px; display: block; margin: 10px 0;\" />",
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(&record.title)
        );
    }

    if !record.content.is_empty() {
        let _ = write!(
            html,
            "<p style=\"color: #666; margin: 5px 0;\">{}</p>",
            encode_text(&record.content)
        );
    }

    let meta: Vec<String> = details(&record.kind)
        .into_iter()
        .filter(|(label, _)| label != "Thumbnail")
        .map(|(label, value)| format!("{}: {}", encode_text(&label), encode_text(&value)))
        .collect();
    if !meta.is_empty() {
        let _ = write!(html, "<p><small>{}</small></p>", meta.join(" | "));
    }

    if !record.engines.is_empty() {
        let _ = write!(
            html,
            "<small>Engines: {}</small><br>",
            encode_text(&record.engines.join(", "))
        );
    }

    let _ = write!(html, "<small style=\"color: #999;\">{}</small></div>", encode_text(&record.url));
    html
}

fn thumbnail(kind: &RecordKind) -> Option<&str> {
    match kind {
        RecordKind::Image { thumbnail, .. }
        | RecordKind::Video { thumbnail, .. }
        | RecordKind::Music { thumbnail, .. } => thumbnail.as_deref(),
        _ => None,
    }
}
