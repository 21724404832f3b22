//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one place state changes. It pattern-matches an
//! [`Event`], mutates [`AppState`], and returns the side effects the runtime
//! must perform. It performs no I/O itself.
//!
//! # Fetch triggers
//!
//! A fetch is issued when, and only when:
//! - the controller starts in Browsing mode,
//! - the category, sort mode, or view mode actually changes and the resulting
//!   mode is Browsing,
//! - a non-blank search is submitted in Browsing mode.
//!
//! Each issued fetch supersedes the previous one; completions carrying an older
//! token are dropped without touching state.
//!
//! # Example
//!
//! ```rust
//! use gifshelf::app::{handle_event, Action, AppState, Event};
//! use gifshelf::domain::Category;
//! use gifshelf::storage::Favorites;
//!
//! let mut state = AppState::new(Favorites::default());
//! let (render, actions) = handle_event(&mut state, &Event::SetCategory(Category::Stickers));
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! ```

use super::modes::ViewMode;
use crate::app::{Action, AppState};
use crate::domain::{Category, Item, Notice, SortMode};
use crate::fetcher::{FetchCompleted, FetchOutcome};

/// Warning shown when favorites could not be written to storage.
pub const FAVORITES_SAVE_FAILED_MESSAGE: &str =
    "Couldn't save favorites. Your latest change may be lost when the app closes.";

/// Intents from the presentation layer and completions from the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Initial mount: loads the default listing when browsing.
    Start,
    /// Selects a content category (Browsing only).
    SetCategory(Category),
    /// Selects the listing order (Browsing only).
    SetSortMode(SortMode),
    /// The search input changed. Does not fetch.
    SearchTextChanged(String),
    /// The search form was submitted with this text.
    SubmitSearch(String),
    /// Flips between Browsing and Favorites.
    ToggleViewMode,
    /// Opens or closes the filter panel.
    SetShowFilters(bool),
    /// Adds or removes an item from favorites.
    ToggleFavorite(Item),
    /// Clears the current notice.
    DismissNotice,
    /// A background fetch finished.
    FetchCompleted(FetchCompleted),
    /// A favorites write finished; `error` holds the diagnostic on failure.
    FavoritesPersisted {
        error: Option<String>,
    },
}

/// Processes an event, mutates state, and returns `(render, actions)`.
///
/// `render` is `true` when the presentation layer should redraw. `actions`
/// must be executed in order by the caller.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Start => {
            if state.mode == ViewMode::Favorites {
                return (false, vec![]);
            }
            (true, vec![Action::Fetch(state.issue_fetch())])
        }
        Event::SetCategory(category) => {
            if state.mode == ViewMode::Favorites {
                tracing::debug!("category change ignored while viewing favorites");
                return (false, vec![]);
            }
            if state.category == *category {
                return (false, vec![]);
            }
            state.category = *category;
            (true, vec![Action::Fetch(state.issue_fetch())])
        }
        Event::SetSortMode(sort_mode) => {
            if state.mode == ViewMode::Favorites {
                tracing::debug!("sort change ignored while viewing favorites");
                return (false, vec![]);
            }
            if state.sort_mode == *sort_mode {
                return (false, vec![]);
            }
            state.sort_mode = *sort_mode;
            (true, vec![Action::Fetch(state.issue_fetch())])
        }
        Event::SearchTextChanged(text) => {
            if state.mode == ViewMode::Favorites {
                return (false, vec![]);
            }
            state.search_text.clone_from(text);
            (true, vec![])
        }
        Event::SubmitSearch(text) => {
            if state.mode == ViewMode::Favorites || text.trim().is_empty() {
                tracing::debug!("blank or out-of-mode search ignored");
                return (false, vec![]);
            }
            state.search_text.clone_from(text);
            (true, vec![Action::Fetch(state.issue_fetch())])
        }
        Event::ToggleViewMode => {
            state.mode = state.mode.toggled();
            tracing::debug!(mode = ?state.mode, "view mode toggled");

            match state.mode {
                ViewMode::Favorites => {
                    state.search_text.clear();
                    state.filters_visible = false;
                    state.invalidate_fetches();
                    (true, vec![])
                }
                ViewMode::Browsing => (true, vec![Action::Fetch(state.issue_fetch())]),
            }
        }
        Event::SetShowFilters(visible) => {
            if state.mode == ViewMode::Favorites || state.filters_visible == *visible {
                return (false, vec![]);
            }
            state.filters_visible = *visible;
            (true, vec![])
        }
        Event::ToggleFavorite(item) => {
            let now_favorite = state.favorites.toggle(item.clone());
            tracing::debug!(id = %item.id, now_favorite = now_favorite, "favorite toggled");
            (true, vec![Action::PersistFavorites(state.favorites.clone())])
        }
        Event::DismissNotice => (state.notice.take().is_some(), vec![]),
        Event::FetchCompleted(completed) => {
            if !state.is_current(completed.token) {
                tracing::debug!(
                    token = completed.token,
                    pending = ?state.pending_fetch(),
                    mode = ?state.mode,
                    "discarding stale fetch completion"
                );
                return (false, vec![]);
            }

            state.settle_fetch();
            match &completed.outcome {
                FetchOutcome::Loaded(items) => {
                    tracing::debug!(token = completed.token, count = items.len(), "results applied");
                    state.results.clone_from(items);
                }
                FetchOutcome::Failed(message) => {
                    tracing::debug!(token = completed.token, "fetch failed, keeping previous results");
                    state.error = Some(message.clone());
                }
            }
            (true, vec![])
        }
        Event::FavoritesPersisted { error } => match error {
            None => (false, vec![]),
            Some(detail) => {
                tracing::warn!(error = %detail, "favorites were not persisted");
                state.notice = Some(Notice::warning(FAVORITES_SAVE_FAILED_MESSAGE));
                (true, vec![])
            }
        },
    }
}

/// Variant name for span fields, without payloads such as full result sets.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Start => "Start",
        Event::SetCategory(_) => "SetCategory",
        Event::SetSortMode(_) => "SetSortMode",
        Event::SearchTextChanged(_) => "SearchTextChanged",
        Event::SubmitSearch(_) => "SubmitSearch",
        Event::ToggleViewMode => "ToggleViewMode",
        Event::SetShowFilters(_) => "SetShowFilters",
        Event::ToggleFavorite(_) => "ToggleFavorite",
        Event::DismissNotice => "DismissNotice",
        Event::FetchCompleted(_) => "FetchCompleted",
        Event::FavoritesPersisted { .. } => "FavoritesPersisted",
    }
}
