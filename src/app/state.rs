//! Application state.
//!
//! [`AppState`] is the single source of truth the presentation layer renders
//! from. It is mutated only by [`handle_event`](crate::app::handle_event), so
//! every transition can be unit tested without a network or a renderer.
//!
//! # State Components
//!
//! - **Mode**: Browsing or Favorites
//! - **Query inputs**: category, sort mode, search text
//! - **Filter panel**: visibility of the sort selector
//! - **Results**: last applied upstream result set, kept while viewing favorites
//! - **Fetch status**: loading flag, user-facing error, pending fetch token
//! - **Favorites**: the loaded favorites set
//! - **Notice**: latest user-visible warning (e.g. a failed favorites save)

use super::modes::ViewMode;
use crate::domain::{Category, Item, Notice, Query, SortMode};
use crate::fetcher::{FetchRequest, FetchToken};
use crate::storage::Favorites;

/// Central view-state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current view mode.
    pub mode: ViewMode,

    /// Active content category.
    pub category: Category,

    /// Listing order used when no search text is active.
    pub sort_mode: SortMode,

    /// Text in the search input. Sent with every browsing fetch, trimmed.
    pub search_text: String,

    /// Whether the sort/filter panel is open.
    pub filters_visible: bool,

    /// Most recently applied upstream result set.
    ///
    /// Left untouched by failed fetches and by switching to favorites.
    pub results: Vec<Item>,

    /// A fetch is pending and its result has not been applied yet.
    pub loading: bool,

    /// User-facing message of the last failed fetch.
    pub error: Option<String>,

    /// Loaded favorites set, persisted on every change.
    pub favorites: Favorites,

    /// Latest user-visible warning.
    pub notice: Option<Notice>,

    /// Token of the only fetch whose completion may still be applied.
    pending_fetch: Option<FetchToken>,

    /// Last token handed out.
    last_token: FetchToken,
}

impl AppState {
    /// Creates browsing state over an already loaded favorites set.
    ///
    /// No fetch is issued until the controller dispatches
    /// [`Event::Start`](crate::app::Event::Start).
    #[must_use]
    pub fn new(favorites: Favorites) -> Self {
        Self {
            mode: ViewMode::Browsing,
            category: Category::default(),
            sort_mode: SortMode::default(),
            search_text: String::new(),
            filters_visible: false,
            results: Vec::new(),
            loading: false,
            error: None,
            favorites,
            notice: None,
            pending_fetch: None,
            last_token: 0,
        }
    }

    /// Query built from the current category, sort mode and search text.
    #[must_use]
    pub fn current_query(&self) -> Query {
        Query::new(self.category, &self.search_text, self.sort_mode)
    }

    /// Starts a new fetch for the current query.
    ///
    /// Hands out the next token, marks it as the only applicable one and moves
    /// into the loading state. Any earlier pending fetch becomes stale.
    pub fn issue_fetch(&mut self) -> FetchRequest {
        self.last_token += 1;
        self.pending_fetch = Some(self.last_token);
        self.loading = true;
        self.error = None;

        let request = FetchRequest {
            token: self.last_token,
            query: self.current_query(),
        };

        tracing::debug!(
            token = request.token,
            category = ?request.query.category,
            sort_mode = ?request.query.sort_mode,
            has_text = request.query.has_text(),
            "fetch issued"
        );

        request
    }

    /// Makes every issued fetch stale and leaves the loading state.
    pub fn invalidate_fetches(&mut self) {
        if let Some(token) = self.pending_fetch.take() {
            tracing::debug!(token = token, "pending fetch invalidated");
        }
        self.loading = false;
    }

    /// Whether a completion carrying `token` may be applied.
    #[must_use]
    pub fn is_current(&self, token: FetchToken) -> bool {
        self.mode == ViewMode::Browsing && self.pending_fetch == Some(token)
    }

    /// Consumes the pending token once its completion is applied.
    pub(crate) fn settle_fetch(&mut self) {
        self.pending_fetch = None;
        self.loading = false;
    }

    #[must_use]
    pub fn pending_fetch(&self) -> Option<FetchToken> {
        self.pending_fetch
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Items the presentation layer should show for the current mode.
    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        match self.mode {
            ViewMode::Browsing => &self.results,
            ViewMode::Favorites => self.favorites.items(),
        }
    }
}
