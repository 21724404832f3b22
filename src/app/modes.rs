//! View mode state type.
//!
//! The controller is in exactly one of two modes. Browsing shows upstream
//! results and is the only mode that ever fetches; Favorites shows the
//! locally stored set and never touches the network.

/// Which collection the presentation layer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Upstream search and listing results.
    #[default]
    Browsing,

    /// The user's saved favorites.
    Favorites,
}

impl ViewMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Browsing => Self::Favorites,
            Self::Favorites => Self::Browsing,
        }
    }
}
