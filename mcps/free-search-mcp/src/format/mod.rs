//! Rendering search outcomes for the calling agent
//!
//! Plain text is the default. HTML fragments and a JSON array are available
//! for clients that want to post-process the results.

mod html;
mod text;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{EmptyReason, RecordKind, SearchOutcome};

/// Shape of the text returned by a search tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered, labelled plain text entries
    #[default]
    Text,
    /// One styled `<div>` per result
    Html,
    /// Pretty-printed JSON array of records
    Json,
}

pub const NO_RESULTS: &str = "No results found.";

const NO_RESULTS_HINTS: &str = "No results found. You can try:\n\
- using different keywords\n\
- simplifying the search query\n\
- checking for spelling mistakes";

/// Render an outcome into the tool's text content
pub fn render(outcome: &SearchOutcome, format: OutputFormat) -> Result<String, SearchError> {
    let records = match outcome {
        SearchOutcome::Results(records) => records,
        SearchOutcome::Empty(EmptyReason::NoResults) => return Ok(NO_RESULTS.to_string()),
        SearchOutcome::Empty(EmptyReason::NoResultsWithHints) => {
            return Ok(NO_RESULTS_HINTS.to_string())
        }
    };

    Ok(match format {
        OutputFormat::Text => text::render(records),
        OutputFormat::Html => html::render(records),
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
    })
}

/// Labelled, category specific fields of a record, in display order
pub(crate) fn details(kind: &RecordKind) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut push = |label: &str, value: &Option<String>| {
        if let Some(value) = value {
            out.push((label.to_string(), value.clone()));
        }
    };

    match kind {
        RecordKind::General | RecordKind::Science => {}
        RecordKind::News { published } => push("Published", published),
        RecordKind::Image {
            thumbnail,
            image_url,
            source,
            resolution,
        } => {
            push("Image", image_url);
            push("Thumbnail", thumbnail);
            push("Source", source);
            push("Resolution", resolution);
        }
        RecordKind::Video {
            thumbnail,
            length,
            author,
            published,
        } => {
            push("Length", length);
            push("Author", author);
            push("Published", published);
            push("Thumbnail", thumbnail);
        }
        RecordKind::Map {
            address,
            latitude,
            longitude,
            details,
        } => {
            push("Address", address);
            if let (Some(lat), Some(lon)) = (latitude, longitude) {
                out.push(("Coordinates".to_string(), format!("{}, {}", lat, lon)));
            }
            out.extend(details.iter().cloned());
        }
        RecordKind::Music {
            thumbnail,
            published,
        } => {
            push("Published", published);
            push("Thumbnail", thumbnail);
        }
        RecordKind::It { attributes } => {
            for key in ["package", "maintainer", "version"] {
                if let Some(value) = attributes.get(key) {
                    out.push((capitalize(key), value.clone()));
                }
            }
        }
        RecordKind::File {
            size,
            seeds,
            leeches,
            has_magnet,
        } => {
            push("Size", size);
            push("Seeds", &seeds.map(|n| n.to_string()));
            push("Leeches", &leeches.map(|n| n.to_string()));
            if *has_magnet {
                out.push(("Magnet link".to_string(), "available".to_string()));
            }
        }
        RecordKind::SocialMedia { hashtags } => {
            if !hashtags.is_empty() {
                let tags: Vec<String> = hashtags.iter().map(|t| format!("#{}", t)).collect();
                out.push(("Hashtags".to_string(), tags.join(", ")));
            }
        }
    }

    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
