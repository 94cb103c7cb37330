//! Validated search requests and their SearXNG form encoding

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::config::{ResponseFormat, SearchConfig};
use crate::error::SearchError;
use crate::format::OutputFormat;
use crate::params::SearchParams;

/// Highest safe-search level SearXNG understands
const MAX_SAFE_SEARCH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub fn as_param(self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }

    /// Parse a caller supplied range. Empty means "any time".
    pub fn parse(value: &str) -> Result<Option<Self>, SearchError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "day" => Ok(Some(TimeRange::Day)),
            "week" => Ok(Some(TimeRange::Week)),
            "month" => Ok(Some(TimeRange::Month)),
            "year" => Ok(Some(TimeRange::Year)),
            other => Err(SearchError::InvalidParameter(format!(
                "time_range must be one of day, week, month, year or empty, got '{}'",
                other
            ))),
        }
    }
}

/// A search ready to be sent to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub category: Category,
    pub language: String,
    pub safe_search: u8,
    pub time_range: Option<TimeRange>,
    pub limit: usize,
    pub output_format: OutputFormat,
}

impl SearchRequest {
    /// Validate tool parameters and fill in category and config defaults
    pub fn from_params(
        category: Category,
        params: SearchParams,
        defaults: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let query = params.query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        let safe_search = params
            .safe_search
            .unwrap_or_else(|| category.default_safe_search());
        if safe_search > MAX_SAFE_SEARCH {
            return Err(SearchError::InvalidParameter(format!(
                "safe_search must be 0, 1 or 2, got {}",
                safe_search
            )));
        }

        let time_range = match params.time_range.as_deref() {
            Some(value) => TimeRange::parse(value)?,
            None => None,
        };

        let limit = params.limit.unwrap_or(defaults.max_results);
        if limit == 0 {
            return Err(SearchError::InvalidParameter(
                "limit must be at least 1".to_string(),
            ));
        }

        let language = params
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| defaults.default_language.clone());

        Ok(Self {
            query: query.to_string(),
            category,
            language,
            safe_search,
            time_range,
            limit,
            output_format: params.output_format.unwrap_or_default(),
        })
    }

    /// Form fields for `POST {base}/search`
    pub fn form_params(&self, format: ResponseFormat, engines: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query.clone()),
            ("categories", self.category.as_param().to_string()),
            ("language", self.language.clone()),
            (
                "time_range",
                self.time_range.map(TimeRange::as_param).unwrap_or_default().to_string(),
            ),
            ("safesearch", self.safe_search.to_string()),
            ("theme", "simple".to_string()),
            ("format", format.as_param().to_string()),
            ("pageno", "1".to_string()),
        ];

        if !engines.trim().is_empty() {
            params.push(("engines", engines.trim().to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(form: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        form.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_defaults_filled_per_category() {
        let defaults = SearchConfig::default();

        let general =
            SearchRequest::from_params(Category::General, SearchParams::new("  rust  "), &defaults)
                .unwrap();
        assert_eq!(general.query, "rust");
        assert_eq!(general.safe_search, 1);
        assert_eq!(general.language, "auto");
        assert_eq!(general.limit, 10);
        assert_eq!(general.output_format, OutputFormat::Text);
        assert_eq!(general.time_range, None);

        let images =
            SearchRequest::from_params(Category::Images, SearchParams::new("cats"), &defaults)
                .unwrap();
        assert_eq!(images.safe_search, 0);
    }

    #[test]
    fn test_blank_query_rejected() {
        let result = SearchRequest::from_params(
            Category::News,
            SearchParams::new(" \t "),
            &SearchConfig::default(),
        );
        assert!(matches!(result, Err(SearchError::InvalidQuery)));
    }

    #[test]
    fn test_bad_parameters_rejected() {
        let defaults = SearchConfig::default();

        let mut params = SearchParams::new("q");
        params.safe_search = Some(3);
        assert!(matches!(
            SearchRequest::from_params(Category::General, params, &defaults),
            Err(SearchError::InvalidParameter(_))
        ));

        let mut params = SearchParams::new("q");
        params.time_range = Some("decade".into());
        assert!(matches!(
            SearchRequest::from_params(Category::General, params, &defaults),
            Err(SearchError::InvalidParameter(_))
        ));

        let mut params = SearchParams::new("q");
        params.limit = Some(0);
        assert!(SearchRequest::from_params(Category::General, params, &defaults).is_err());
    }

    #[test]
    fn test_empty_time_range_means_any_time() {
        assert_eq!(TimeRange::parse("").unwrap(), None);
        assert_eq!(TimeRange::parse(" Week ").unwrap(), Some(TimeRange::Week));
    }

    #[test]
    fn test_form_params() {
        let mut params = SearchParams::new("tweets about ai");
        params.time_range = Some("month".into());
        params.language = Some("en".into());
        let request =
            SearchRequest::from_params(Category::SocialMedia, params, &SearchConfig::default())
                .unwrap();

        let form = request.form_params(ResponseFormat::Json, "");
        assert_eq!(param(&form, "q"), Some("tweets about ai"));
        assert_eq!(param(&form, "categories"), Some("social media"));
        assert_eq!(param(&form, "language"), Some("en"));
        assert_eq!(param(&form, "time_range"), Some("month"));
        assert_eq!(param(&form, "safesearch"), Some("0"));
        assert_eq!(param(&form, "theme"), Some("simple"));
        assert_eq!(param(&form, "format"), Some("json"));
        assert_eq!(param(&form, "engines"), None);

        let form = request.form_params(ResponseFormat::Html, "reddit, mastodon");
        assert_eq!(param(&form, "format"), Some("html"));
        assert_eq!(param(&form, "engines"), Some("reddit, mastodon"));
    }
}
