//! Item domain model.
//!
//! An [`Item`] is one searchable media result (an animation or a sticker) with a
//! stable identity, a display title and the single rendition used for display.
//! Identity is the only key used for favorite membership and deduplication, so
//! equality and hashing look at `id` alone.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Closed classification of an item as returned by the upstream API.
///
/// "text" is a query category, not an item type, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Animated image (`gif` upstream).
    Gif,
    /// Transparent sticker (`sticker` upstream).
    Sticker,
}

impl ItemKind {
    /// Maps the upstream `type` field into the closed kind set.
    ///
    /// Returns `None` for values outside the set.
    ///
    /// ```
    /// use gifshelf::domain::ItemKind;
    ///
    /// assert_eq!(ItemKind::from_upstream("gif"), Some(ItemKind::Gif));
    /// assert_eq!(ItemKind::from_upstream("sticker"), Some(ItemKind::Sticker));
    /// assert_eq!(ItemKind::from_upstream("clip"), None);
    /// ```
    #[must_use]
    pub fn from_upstream(value: &str) -> Option<Self> {
        match value {
            "gif" => Some(Self::Gif),
            "sticker" => Some(Self::Sticker),
            _ => None,
        }
    }

    /// Label shown under a card.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Sticker => "sticker",
        }
    }
}

/// One sized variant of an item's media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A single media result.
///
/// # Fields
///
/// - `id`: opaque upstream identity, unique within a result set
/// - `title`: display title, may be empty
/// - `rendition`: the fixed-height rendition used for display, share, download and embed
/// - `kind`: animation or sticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub rendition: Rendition,
    pub kind: ItemKind,
}

impl Item {
    /// Creates an item from its parts.
    ///
    /// ```
    /// use gifshelf::domain::{Item, ItemKind, Rendition};
    ///
    /// let item = Item::new(
    ///     "abc",
    ///     "Dancing cat",
    ///     Rendition { url: "https://media.example/abc.gif".into(), width: 356, height: 200 },
    ///     ItemKind::Gif,
    /// );
    /// assert_eq!(item.id, "abc");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, rendition: Rendition, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            rendition,
            kind,
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, width: u32) -> Item {
        Item::new(
            id,
            title,
            Rendition {
                url: format!("https://media.example/{id}.gif"),
                width,
                height: 200,
            },
            ItemKind::Gif,
        )
    }

    #[test]
    fn same_id_is_same_item_despite_metadata_changes() {
        assert_eq!(item("a", "old title", 100), item("a", "new title", 300));
        assert_ne!(item("a", "same", 100), item("b", "same", 100));
    }

    #[test]
    fn persisted_shape_uses_lowercase_kind() {
        let json = serde_json::to_value(item("a", "t", 1)).unwrap();
        assert_eq!(json["kind"], "gif");
        assert_eq!(json["rendition"]["width"], 1);
    }
}
