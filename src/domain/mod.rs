//! Domain layer for gifshelf.
//!
//! Core types independent of HTTP, storage, or any presentation layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item, rendition and kind model
//! - [`notice`]: Transient user notifications
//! - [`query`]: Category, sort mode and query parameters

pub mod error;
pub mod item;
pub mod notice;
pub mod query;

pub use error::{GifShelfError, Result};
pub use item::{Item, ItemKind, Rendition};
pub use notice::{Notice, NoticeLevel};
pub use query::{Category, Query, SortMode, RESULT_LIMIT};
