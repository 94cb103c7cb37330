//! Normalized search records
//!
//! Both the JSON and the HTML extraction paths produce these types, so the
//! formatters never need to know which body format the instance served.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// The title of the result
    pub title: String,
    /// The URL of the result
    pub url: String,
    /// A description or snippet of the result
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Engines that returned this result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub engines: Vec<String>,
    /// Category specific fields
    #[serde(flatten)]
    pub kind: RecordKind,
}

impl SearchRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: String::new(),
            engines: Vec::new(),
            kind,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_engines(mut self, engines: Vec<String>) -> Self {
        self.engines = engines;
        self
    }
}

/// Category specific result details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordKind {
    General,
    News {
        /// Publication date, or "date | source" from the HTML page
        #[serde(default, skip_serializing_if = "Option::is_none")]
        published: Option<String>,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        /// Site the image was found on
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        /// e.g. "1920 x 1080"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolution: Option<String>,
    },
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        published: Option<String>,
    },
    Map {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        latitude: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        longitude: Option<f64>,
        /// Key/value rows in page order (opening hours, phone, ...)
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        details: Vec<(String, String)>,
    },
    Music {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        published: Option<String>,
    },
    It {
        /// package / maintainer / version
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
    },
    Science,
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeds: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        leeches: Option<u64>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        has_magnet: bool,
    },
    SocialMedia {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        hashtags: Vec<String>,
    },
}

/// Why a search produced nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoResults,
    /// The instance rendered its "no results" dialog; suggest query changes
    NoResultsWithHints,
}

/// What a backend returns for one search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<SearchRecord>),
    Empty(EmptyReason),
}

impl SearchOutcome {
    /// Results, or `NoResults` when the list is empty
    pub fn from_records(records: Vec<SearchRecord>) -> Self {
        if records.is_empty() {
            SearchOutcome::Empty(EmptyReason::NoResults)
        } else {
            SearchOutcome::Results(records)
        }
    }

    /// Keep at most `limit` records
    pub fn truncate(self, limit: usize) -> Self {
        match self {
            SearchOutcome::Results(mut records) => {
                records.truncate(limit);
                SearchOutcome::from_records(records)
            }
            empty => empty,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchOutcome::Results(records) => records.len(),
            SearchOutcome::Empty(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
