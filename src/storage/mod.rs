//! Storage layer for the favorites set.
//!
//! Durable storage is modeled as named slots each holding one serialized
//! payload. The favorites store reads its slot once at startup and rewrites it
//! in full after every mutation.
//!
//! # Modules
//!
//! - `backend`: [`SlotStorage`] trait
//! - `json`: one JSON file per slot with atomic writes
//! - `memory`: in-process map backend
//! - `favorites`: favorites set and write-through store

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;

pub use backend::SlotStorage;
pub use favorites::{Favorites, FavoritesStore, FAVORITES_SLOT};
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
