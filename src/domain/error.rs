//! Error types for gifshelf.
//!
//! This module defines the centralized error type [`GifShelfError`] and a type alias
//! [`Result`] used throughout the crate. All variants are derived with `thiserror`.
//!
//! Errors are never fatal to the controller: fetch errors are collapsed into a
//! generic user-facing message at the fetcher boundary, storage errors become
//! warnings in the view state, and platform errors are reported through the
//! notifier by the item actions.

use thiserror::Error;

/// The main error type for gifshelf operations.
///
/// # Examples
///
/// ```
/// use gifshelf::GifShelfError;
///
/// fn write_slot() -> Result<(), GifShelfError> {
///     Err(GifShelfError::Storage("quota exceeded".to_string()))
/// }
/// assert!(write_slot().is_err());
/// ```
#[derive(Debug, Error)]
pub enum GifShelfError {
    /// Reading or writing durable storage failed.
    ///
    /// Raised by [`SlotStorage`](crate::storage::SlotStorage) implementations,
    /// e.g. when the backing directory is read-only or the quota is exhausted.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream request failed (transport, non-success status, malformed payload
    /// or timeout). The message is diagnostic and is never shown to the user verbatim.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A platform capability (share, clipboard, file save) failed or was denied.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Drops the request URL, which carries the API key, before the error can be
/// logged.
impl From<reqwest::Error> for GifShelfError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.without_url().to_string())
    }
}

/// A specialized `Result` type for gifshelf operations.
pub type Result<T> = std::result::Result<T, GifShelfError>;
