//! Parameter types for search tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;

/// Input shared by every category search tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "The search query string")]
    pub query: String,

    #[schemars(description = "Search language code such as 'en', 'zh-CN' or 'auto' (default: auto)")]
    #[serde(default)]
    pub language: Option<String>,

    #[schemars(
        description = "Safe search level: 0 = off, 1 = moderate, 2 = strict \
                       (default: 1 for general and news, 0 otherwise)"
    )]
    #[serde(default)]
    pub safe_search: Option<u8>,

    #[schemars(description = "Restrict results by age: 'day', 'week', 'month', 'year' or empty for any time")]
    #[serde(default)]
    pub time_range: Option<String>,

    #[schemars(description = "Output format: 'text' (default), 'html' or 'json'")]
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    #[schemars(description = "Maximum number of results to return (default: 10)")]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}
