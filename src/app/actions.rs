//! Actions representing side effects to be executed by the controller runtime.
//!
//! The event handler never performs I/O. It returns [`Action`]s and the
//! [`Controller`](crate::app::Controller) executes them: spawning fetches and
//! writing favorites to durable storage.

use crate::fetcher::FetchRequest;
use crate::storage::Favorites;

/// Side effects emitted by [`handle_event`](crate::app::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a fetch in the background.
    ///
    /// Its completion comes back as
    /// [`Event::FetchCompleted`](crate::app::Event::FetchCompleted) carrying the
    /// same token.
    Fetch(FetchRequest),

    /// Writes the full favorites set to durable storage.
    ///
    /// Carries a snapshot of the set as it was right after the mutation. The
    /// outcome comes back as
    /// [`Event::FavoritesPersisted`](crate::app::Event::FavoritesPersisted).
    PersistFavorites(Favorites),
}
