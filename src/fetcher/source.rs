//! Content source abstraction.
//!
//! [`ContentSource`] is the seam between the controller and the network. The
//! production implementation is [`GiphyClient`](crate::fetcher::GiphyClient);
//! tests substitute scripted sources to control response timing.

use crate::domain::error::Result;
use crate::domain::{Item, Query};
use futures_util::future::BoxFuture;

/// Remote provider of items and media bytes.
///
/// Methods return boxed futures so the trait stays object safe and can be
/// shared as `Arc<dyn ContentSource>` across spawned tasks.
pub trait ContentSource: Send + Sync {
    /// Runs `query` against the upstream API and returns normalized items in
    /// upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`GifShelfError::Fetch`](crate::GifShelfError::Fetch) on
    /// transport errors, non-success status or malformed payloads.
    fn fetch(&self, query: Query) -> BoxFuture<'_, Result<Vec<Item>>>;

    /// Downloads the binary body at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`GifShelfError::Fetch`](crate::GifShelfError::Fetch) on
    /// transport errors or non-success status.
    fn download(&self, url: String) -> BoxFuture<'_, Result<Vec<u8>>>;
}
