//! SearXNG JSON API responses
//!
//! See: https://docs.searxng.org/dev/search_api.html

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{hashtags, human_size, non_empty, squash_whitespace};
use crate::category::Category;
use crate::error::SearchError;
use crate::types::{RecordKind, SearchOutcome, SearchRecord};

// SearXNG API response types. Engines disagree on which fields they fill
// (and some send explicit nulls), so almost everything is optional.
#[derive(Debug, Deserialize)]
struct SearXNGResponse {
    #[serde(default)]
    results: Vec<SearXNGResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearXNGResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
    engine: Option<String>,
    engines: Option<Vec<String>>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    thumbnail: Option<String>,
    thumbnail_src: Option<String>,
    img_src: Option<String>,
    img_format: Option<String>,
    resolution: Option<String>,
    source: Option<String>,
    author: Option<String>,
    length: Option<Value>,
    address: Option<Value>,
    latitude: Option<Value>,
    longitude: Option<Value>,
    filesize: Option<Value>,
    seed: Option<Value>,
    leech: Option<Value>,
    magnetlink: Option<String>,
    package_name: Option<String>,
    maintainer: Option<String>,
    version: Option<String>,
}

/// Parse a `format=json` body
pub fn parse_results(body: &str, category: Category) -> Result<SearchOutcome, SearchError> {
    let response: SearXNGResponse = serde_json::from_str(body)?;

    let records: Vec<SearchRecord> = response
        .results
        .into_iter()
        .map(|r| to_record(r, category))
        .collect();

    tracing::debug!(count = records.len(), %category, "JSON results parsed");
    Ok(SearchOutcome::from_records(records))
}

fn to_record(r: SearXNGResult, category: Category) -> SearchRecord {
    let content = r.content.clone().unwrap_or_default();

    let engines = match r.engines.clone() {
        Some(engines) if !engines.is_empty() => engines,
        _ => r.engine.clone().into_iter().collect(),
    };

    let kind = match category {
        Category::General => RecordKind::General,
        Category::News => RecordKind::News {
            published: r.published_date.and_then(non_empty),
        },
        Category::Images => RecordKind::Image {
            thumbnail: r.thumbnail_src.or(r.thumbnail).and_then(non_empty),
            image_url: r.img_src.and_then(non_empty),
            source: r.source.and_then(non_empty),
            resolution: r.resolution.or(r.img_format).and_then(non_empty),
        },
        Category::Videos => RecordKind::Video {
            thumbnail: r.thumbnail.or(r.thumbnail_src).and_then(non_empty),
            length: r.length.as_ref().and_then(value_to_string),
            author: r.author.and_then(non_empty),
            published: r.published_date.and_then(non_empty),
        },
        Category::Map => RecordKind::Map {
            address: r.address.as_ref().and_then(format_address),
            latitude: r.latitude.as_ref().and_then(value_to_f64),
            longitude: r.longitude.as_ref().and_then(value_to_f64),
            details: Vec::new(),
        },
        Category::Music => RecordKind::Music {
            thumbnail: r.thumbnail.or(r.thumbnail_src).and_then(non_empty),
            published: r.published_date.and_then(non_empty),
        },
        Category::It => {
            let mut attributes = BTreeMap::new();
            for (key, value) in [
                ("package", r.package_name),
                ("maintainer", r.maintainer),
                ("version", r.version),
            ] {
                if let Some(value) = value.and_then(non_empty) {
                    attributes.insert(key.to_string(), value);
                }
            }
            RecordKind::It { attributes }
        }
        Category::Science => RecordKind::Science,
        Category::Files => RecordKind::File {
            size: r.filesize.as_ref().and_then(|v| match v {
                Value::Number(n) => n.as_u64().map(human_size),
                other => value_to_string(other),
            }),
            seeds: r.seed.as_ref().and_then(value_to_u64),
            leeches: r.leech.as_ref().and_then(value_to_u64),
            has_magnet: r.magnetlink.is_some_and(|m| !m.trim().is_empty()),
        },
        Category::SocialMedia => RecordKind::SocialMedia {
            hashtags: hashtags(&content),
        },
    };

    // Snippets may carry line breaks; records hold single-line text
    SearchRecord::new(
        squash_whitespace(&r.title.unwrap_or_default()),
        r.url.unwrap_or_default().trim(),
        kind,
    )
    .with_content(squash_whitespace(&content))
    .with_engines(engines)
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.as_str()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Join an OpenStreetMap style address object into one line
fn format_address(value: &Value) -> Option<String> {
    const PARTS: [&str; 6] = ["name", "road", "house_number", "locality", "postcode", "country"];

    match value {
        Value::String(s) => non_empty(s.as_str()),
        Value::Object(map) => {
            let parts: Vec<String> = PARTS
                .iter()
                .filter_map(|key| map.get(*key).and_then(value_to_string))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}
