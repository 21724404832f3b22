//! Controller runtime: executes actions and feeds completions back.
//!
//! The [`Controller`] owns the [`AppState`], the favorites store and the content
//! source. Every intent goes through [`Controller::dispatch`], which runs the
//! pure handler and then performs the returned actions. Follow-up events (a
//! save outcome, for instance) are queued and processed in order within the
//! same call, so the handler only ever sees one event at a time.
//!
//! Fetches run on Tokio tasks. Their completions travel over a channel and are
//! applied only when the caller asks for them ([`Controller::next_completion`]
//! or [`Controller::drain_completions`]), which keeps the controller on a
//! single logical timeline.

use super::handler::{handle_event, Event};
use super::state::AppState;
use crate::app::Action;
use crate::domain::{Category, Item, SortMode};
use crate::fetcher::{self, ContentSource, FetchCompleted, FetchRequest, FetchToken};
use crate::storage::FavoritesStore;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Owner of the view state and executor of its side effects.
pub struct Controller {
    state: AppState,
    store: FavoritesStore,
    source: Arc<dyn ContentSource>,
    runtime: Handle,
    fetch_timeout: Duration,
    completions_tx: mpsc::UnboundedSender<FetchCompleted>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompleted>,
    in_flight: usize,
}

impl Controller {
    /// Creates a controller, loading favorites from `store` once.
    ///
    /// No fetch is issued until [`Controller::start`].
    #[must_use]
    pub fn new(store: FavoritesStore, source: Arc<dyn ContentSource>, runtime: Handle, fetch_timeout: Duration) -> Self {
        let favorites = store.load();
        tracing::debug!(favorites = favorites.len(), "controller created");

        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(favorites),
            store,
            source,
            runtime,
            fetch_timeout,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    /// Current state, for rendering.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Shared handle to the content source, for building
    /// [`ItemActions`](crate::item_actions::ItemActions) over the same client.
    #[must_use]
    pub fn source(&self) -> Arc<dyn ContentSource> {
        Arc::clone(&self.source)
    }

    /// Number of spawned fetches whose completion has not been received yet.
    ///
    /// Includes fetches that are already stale.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Processes `event` and everything it triggers. Returns whether to redraw.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let mut queue = VecDeque::from([event]);
        let mut render = false;

        while let Some(event) = queue.pop_front() {
            let (changed, actions) = handle_event(&mut self.state, &event);
            render |= changed;

            for action in actions {
                if let Some(follow_up) = self.execute(action) {
                    queue.push_back(follow_up);
                }
            }
        }

        render
    }

    fn execute(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::Fetch(request) => {
                self.spawn_fetch(request);
                None
            }
            Action::PersistFavorites(snapshot) => {
                let error = self.store.save(&snapshot).err().map(|e| e.to_string());
                Some(Event::FavoritesPersisted { error })
            }
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let reply = CompletionSender::new(self.completions_tx.clone(), request.token);
        let timeout = self.fetch_timeout;

        self.in_flight += 1;
        self.runtime.spawn(async move {
            let completed = fetcher::execute(source.as_ref(), request, timeout).await;
            reply.send(completed);
        });
    }

    fn apply_completion(&mut self, completed: FetchCompleted) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dispatch(Event::FetchCompleted(completed))
    }

    /// Waits for the next fetch completion and applies it.
    ///
    /// Returns `None` when nothing is in flight, otherwise whether the
    /// completion changed what should be rendered (stale completions do not).
    pub async fn next_completion(&mut self) -> Option<bool> {
        if self.in_flight == 0 {
            return None;
        }
        let completed = self.completions_rx.recv().await?;
        Some(self.apply_completion(completed))
    }

    /// Applies every completion that has already arrived, without waiting.
    ///
    /// Meant for frame-driven presentation loops. Returns whether to redraw.
    pub fn drain_completions(&mut self) -> bool {
        let mut render = false;
        while let Ok(completed) = self.completions_rx.try_recv() {
            render |= self.apply_completion(completed);
        }
        render
    }

    /// Waits until every spawned fetch has completed, applying each in arrival order.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Initial load of the default listing.
    pub fn start(&mut self) -> bool {
        self.dispatch(Event::Start)
    }

    /// Switches the content category and refetches.
    ///
    /// Ignored while viewing favorites or when the category is unchanged.
    ///
    /// # Returns
    ///
    /// `true` if the state changed and should be re-rendered.
    pub fn set_category(&mut self, category: Category) -> bool {
        self.dispatch(Event::SetCategory(category))
    }

    /// Switches between trending and random listings and refetches.
    ///
    /// Ignored while viewing favorites or when the mode is unchanged.
    pub fn set_sort_mode(&mut self, sort_mode: SortMode) -> bool {
        self.dispatch(Event::SetSortMode(sort_mode))
    }

    /// Records in-progress search text without fetching.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        self.dispatch(Event::SearchTextChanged(text.into()))
    }

    /// Submits a free-text search.
    ///
    /// Blank text is ignored. The current category and sort mode still apply.
    pub fn submit_search(&mut self, text: impl Into<String>) -> bool {
        self.dispatch(Event::SubmitSearch(text.into()))
    }

    /// Flips between browsing and favorites.
    ///
    /// Entering favorites clears the search text, hides the filter panel and
    /// abandons any pending fetch. Returning to browsing refetches.
    pub fn toggle_view_mode(&mut self) -> bool {
        self.dispatch(Event::ToggleViewMode)
    }

    /// Shows or hides the filter panel. Browsing only.
    pub fn set_show_filters(&mut self, visible: bool) -> bool {
        self.dispatch(Event::SetShowFilters(visible))
    }

    /// Toggles favorite membership and writes the set through to storage.
    ///
    /// A failed write leaves the in-memory set as toggled and raises a warning
    /// notice in the state.
    pub fn toggle_favorite(&mut self, item: Item) -> bool {
        self.dispatch(Event::ToggleFavorite(item))
    }

    /// Clears the current notice. Returns `false` when there was none.
    pub fn dismiss_notice(&mut self) -> bool {
        self.dispatch(Event::DismissNotice)
    }
}

/// Delivers exactly one completion per spawned fetch.
///
/// If the task ends without sending (a panicking source, a shut down
/// runtime), a failed completion is sent on drop so `in_flight` and `loading`
/// cannot stay stuck.
struct CompletionSender {
    tx: Option<mpsc::UnboundedSender<FetchCompleted>>,
    token: FetchToken,
}

impl CompletionSender {
    const fn new(tx: mpsc::UnboundedSender<FetchCompleted>, token: FetchToken) -> Self {
        Self { tx: Some(tx), token }
    }

    fn send(mut self, completed: FetchCompleted) {
        if let Some(tx) = self.tx.take() {
            if tx.send(completed).is_err() {
                tracing::debug!(token = self.token, "controller dropped before fetch completed");
            }
        }
    }
}

impl Drop for CompletionSender {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tracing::warn!(token = self.token, "fetch task ended without a result");
            let _ = tx.send(FetchCompleted::failed(self.token));
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("store", &self.store)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
