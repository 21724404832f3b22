//! Endpoint routing for upstream requests.
//!
//! Search and "no search" are different upstream operations, not one endpoint
//! with an empty parameter. [`Endpoint::route`] makes that decision from a
//! [`Query`] and [`request_url`] turns it into a full URL with the fixed
//! parameters attached.

use crate::domain::error::{GifShelfError, Result};
use crate::domain::{Query, SortMode, RESULT_LIMIT};

/// Upstream operation selected for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `{base}/{category}/search` with `q`.
    Search,
    /// `{base}/{category}/trending`.
    Trending,
    /// `{base}/{category}/random`.
    Random,
}

impl Endpoint {
    /// Picks the endpoint for a query.
    ///
    /// Non-empty (trimmed) text always searches, whatever the sort mode. Empty
    /// text falls back to the listing chosen by the sort mode.
    ///
    /// ```
    /// use gifshelf::domain::{Category, Query, SortMode};
    /// use gifshelf::fetcher::Endpoint;
    ///
    /// let search = Query::new(Category::Gifs, "cat", SortMode::Recent);
    /// assert_eq!(Endpoint::route(&search), Endpoint::Search);
    ///
    /// let listing = Query::new(Category::Gifs, "   ", SortMode::Recent);
    /// assert_eq!(Endpoint::route(&listing), Endpoint::Random);
    /// ```
    #[must_use]
    pub fn route(query: &Query) -> Self {
        if query.has_text() {
            Self::Search
        } else {
            match query.sort_mode {
                SortMode::Trending => Self::Trending,
                SortMode::Recent => Self::Random,
            }
        }
    }

    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Trending => "trending",
            Self::Random => "random",
        }
    }
}

/// Builds the full request URL for `query`.
///
/// Every request carries `api_key`, `limit` and `rating`; `q` is only sent
/// for searches.
///
/// # Errors
///
/// Returns a configuration error if `base_url` is not a valid absolute URL.
pub fn request_url(base_url: &str, api_key: &str, rating: &str, query: &Query) -> Result<reqwest::Url> {
    let endpoint = Endpoint::route(query);
    let raw = format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        query.category.path_segment(),
        endpoint.path_segment()
    );
    let mut url = reqwest::Url::parse(&raw)
        .map_err(|e| GifShelfError::Config(format!("invalid base url {base_url:?}: {e}")))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("api_key", api_key);
        if endpoint == Endpoint::Search {
            pairs.append_pair("q", &query.query);
        }
        pairs.append_pair("limit", &RESULT_LIMIT.to_string());
        pairs.append_pair("rating", rating);
    }

    Ok(url)
}
