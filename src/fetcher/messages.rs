//! Fetch request and completion messages.
//!
//! The controller hands a [`FetchRequest`] to the runtime, which runs it on a
//! background task and feeds a [`FetchCompleted`] back. The token on both is
//! the generation tag the controller uses to discard stale completions.

use crate::domain::{Item, Query};

/// Message shown to the user for any fetch failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch content. Please try again later.";

/// Generation tag for one issued fetch. Strictly increasing per controller.
pub type FetchToken = u64;

/// A fetch issued by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: FetchToken,
    pub query: Query,
}

/// Result of a fetch as seen by the controller.
///
/// Failures carry only the user-facing message; the underlying error has
/// already been logged at the fetcher boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(Vec<Item>),
    Failed(String),
}

/// Completion of a [`FetchRequest`], routed back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompleted {
    pub token: FetchToken,
    pub outcome: FetchOutcome,
}

impl FetchCompleted {
    #[must_use]
    pub const fn loaded(token: FetchToken, items: Vec<Item>) -> Self {
        Self {
            token,
            outcome: FetchOutcome::Loaded(items),
        }
    }

    #[must_use]
    pub fn failed(token: FetchToken) -> Self {
        Self {
            token,
            outcome: FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_string()),
        }
    }
}
