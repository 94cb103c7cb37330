//! Search categories exposed as tools
//!
//! Each category maps 1:1 onto a SearXNG `categories` value and an MCP tool name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A SearXNG search category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    General,
    News,
    Images,
    Videos,
    Map,
    Music,
    It,
    Science,
    Files,
    SocialMedia,
}

impl Category {
    /// Every category, in tool listing order
    pub const ALL: [Category; 10] = [
        Category::General,
        Category::News,
        Category::Images,
        Category::Videos,
        Category::Map,
        Category::Music,
        Category::It,
        Category::Science,
        Category::Files,
        Category::SocialMedia,
    ];

    /// The value sent in the `categories` form field
    pub fn as_param(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::News => "news",
            Category::Images => "images",
            Category::Videos => "videos",
            Category::Map => "map",
            Category::Music => "music",
            Category::It => "it",
            Category::Science => "science",
            Category::Files => "files",
            Category::SocialMedia => "social media",
        }
    }

    /// The MCP tool that searches this category
    pub fn tool_name(self) -> &'static str {
        match self {
            Category::General => "free_general_search",
            Category::News => "free_news_search",
            Category::Images => "free_image_search",
            Category::Videos => "free_video_search",
            Category::Map => "free_map_search",
            Category::Music => "free_music_search",
            Category::It => "free_it_search",
            Category::Science => "free_science_search",
            Category::Files => "free_file_search",
            Category::SocialMedia => "free_social_media_search",
        }
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tool_name() == name)
    }

    /// Safe-search level used when the caller does not pass one.
    ///
    /// General and news searches filter by default; everything else does not.
    pub fn default_safe_search(self) -> u8 {
        match self {
            Category::General | Category::News => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_tool_name(category.tool_name()), Some(category));
        }
        assert_eq!(Category::from_tool_name("free_podcast_search"), None);
    }

    #[test]
    fn test_tool_names_unique() {
        let names: HashSet<_> = Category::ALL.iter().map(|c| c.tool_name()).collect();
        assert_eq!(names.len(), Category::ALL.len());
    }

    #[test]
    fn test_social_media_param_has_space() {
        assert_eq!(Category::SocialMedia.as_param(), "social media");
        assert_eq!(Category::Files.to_string(), "files");
    }

    #[test]
    fn test_default_safe_search() {
        assert_eq!(Category::General.default_safe_search(), 1);
        assert_eq!(Category::News.default_safe_search(), 1);
        assert_eq!(Category::Images.default_safe_search(), 0);
        assert_eq!(Category::SocialMedia.default_safe_search(), 0);
    }
}
