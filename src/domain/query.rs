//! Query parameters sent to the upstream API.
//!
//! A query is the triple of [`Category`], free text and [`SortMode`]. The result
//! cap and content rating are fixed and are applied by the fetcher on every
//! request.

use serde::{Deserialize, Serialize};

/// Number of items requested per fetch.
pub const RESULT_LIMIT: u32 = 50;

/// Content category; also the first path segment of every upstream endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Animated images.
    #[default]
    Gifs,
    /// Stickers.
    Stickers,
    /// Text-to-media animations.
    Text,
}

impl Category {
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Gifs => "gifs",
            Self::Stickers => "stickers",
            Self::Text => "text",
        }
    }
}

/// Ordering of the default listing shown when no search text is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Upstream trending listing.
    #[default]
    Trending,
    /// Upstream random-sample listing.
    Recent,
}

/// Parameters of a single fetch.
///
/// `query` is stored already trimmed; an empty query means "default listing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub category: Category,
    pub query: String,
    pub sort_mode: SortMode,
}

impl Query {
    /// Builds a query, trimming surrounding whitespace from the text.
    ///
    /// ```
    /// use gifshelf::domain::{Category, Query, SortMode};
    ///
    /// let query = Query::new(Category::Gifs, "  cat ", SortMode::Trending);
    /// assert_eq!(query.query, "cat");
    /// assert!(query.has_text());
    /// ```
    #[must_use]
    pub fn new(category: Category, query: &str, sort_mode: SortMode) -> Self {
        Self {
            category,
            query: query.trim().to_string(),
            sort_mode,
        }
    }

    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.query.is_empty()
    }
}
