//! Favorites set and its write-through store.
//!
//! [`Favorites`] is the in-memory set, keyed by item id and kept in insertion
//! order for display. [`FavoritesStore`] loads it once from a named slot and
//! rewrites the whole slot on every save. There is no transaction log: a crash
//! between a toggle and its save loses that one toggle.

use crate::domain::error::Result;
use crate::domain::Item;
use crate::storage::backend::SlotStorage;

/// Slot holding the serialized favorites array.
pub const FAVORITES_SLOT: &str = "giphyFavorites";

/// Set of favorited items with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    items: Vec<Item>,
}

impl Favorites {
    /// Builds a set from items, keeping the first occurrence of each id.
    ///
    /// ```
    /// use gifshelf::domain::{Item, ItemKind, Rendition};
    /// use gifshelf::storage::Favorites;
    ///
    /// let r = Rendition { url: "u".into(), width: 1, height: 1 };
    /// let favorites = Favorites::from_items(vec![
    ///     Item::new("a", "first", r.clone(), ItemKind::Gif),
    ///     Item::new("a", "second", r, ItemKind::Gif),
    /// ]);
    /// assert_eq!(favorites.len(), 1);
    /// assert_eq!(favorites.items()[0].title, "first");
    /// ```
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut favorites = Self::default();
        for item in items {
            if !favorites.contains(&item.id) {
                favorites.items.push(item);
            }
        }
        favorites
    }

    /// Removes the item if its id is present, otherwise inserts it.
    ///
    /// This is the only mutation primitive. Returns `true` when the item is
    /// favorited after the call.
    pub fn toggle(&mut self, item: Item) -> bool {
        if let Some(pos) = self.items.iter().position(|f| f.id == item.id) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Membership by id only; title and rendition are ignored.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|f| f.id == id)
    }

    /// Favorites in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of distinct favorited ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Durable favorites persistence over a [`SlotStorage`].
pub struct FavoritesStore {
    storage: Box<dyn SlotStorage>,
    slot: String,
}

impl FavoritesStore {
    /// Creates a store persisting to [`FAVORITES_SLOT`].
    #[must_use]
    pub fn new(storage: Box<dyn SlotStorage>) -> Self {
        Self::with_slot(storage, FAVORITES_SLOT)
    }

    #[must_use]
    pub fn with_slot(storage: Box<dyn SlotStorage>, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    /// Reads the favorites slot.
    ///
    /// Fails soft: a missing slot, unreadable storage or malformed payload all
    /// yield an empty set. Duplicate ids in a stored payload collapse to the
    /// first occurrence.
    #[must_use]
    pub fn load(&self) -> Favorites {
        let _span = tracing::debug_span!("favorites_load", slot = %self.slot).entered();

        let payload = match self.storage.read(&self.slot) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!("no saved favorites");
                return Favorites::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites, starting empty");
                return Favorites::default();
            }
        };

        match serde_json::from_str::<Vec<Item>>(&payload) {
            Ok(items) => {
                let favorites = Favorites::from_items(items);
                tracing::debug!(count = favorites.len(), "favorites loaded");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved favorites are malformed, starting empty");
                Favorites::default()
            }
        }
    }

    /// Serializes the full set and overwrites the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails. The
    /// caller's in-memory set is untouched either way.
    pub fn save(&mut self, favorites: &Favorites) -> Result<()> {
        let _span = tracing::debug_span!("favorites_save", slot = %self.slot, count = favorites.len()).entered();

        let payload = serde_json::to_string(favorites.items())?;
        self.storage.write(&self.slot, &payload)?;

        tracing::debug!("favorites saved");
        Ok(())
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
