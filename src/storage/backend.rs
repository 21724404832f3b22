//! Storage backend abstraction.
//!
//! This module defines the [`SlotStorage`] trait: a durable key-value surface
//! where each named slot holds one serialized payload. It mirrors the browser's
//! local storage, which is all the favorites store needs, and lets the file
//! backend be swapped for an in-memory one without touching business logic.

use crate::domain::error::Result;

/// Durable named-slot storage.
///
/// A slot holds a single string payload. Writes replace the previous value in
/// full; there is no partial update.
///
/// # Implementations
///
/// - [`JsonFileStorage`](crate::storage::JsonFileStorage): one JSON file per slot with atomic writes
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local map
pub trait SlotStorage: Send {
    /// Reads the payload stored in `slot`.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, slot: &str) -> Result<Option<String>>;

    /// Replaces the payload stored in `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (read-only storage, quota, invalid slot name).
    fn write(&mut self, slot: &str, payload: &str) -> Result<()>;
}
