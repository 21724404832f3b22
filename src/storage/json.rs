//! JSON file-based storage backend.
//!
//! Each slot maps to `<dir>/<slot>.json`. Writes go to a temporary sibling file
//! that is then renamed over the target, so a crash mid-write never leaves a
//! truncated payload behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: one `read_to_string` per call, no caching
//! - **Write**: O(n) in payload size, full rewrite
//! - **Best for**: small payloads written on user interaction

use crate::domain::error::{GifShelfError, Result};
use crate::storage::backend::SlotStorage;
use std::path::{Path, PathBuf};

/// File storage backend holding one JSON document per slot.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; owned by the single controller timeline.
///
/// # Example
///
/// ```no_run
/// use gifshelf::storage::{JsonFileStorage, SlotStorage};
///
/// let mut storage = JsonFileStorage::new("/tmp/gifshelf")?;
/// storage.write("giphyFavorites", "[]")?;
/// assert_eq!(storage.read("giphyFavorites")?.as_deref(), Some("[]"));
/// # Ok::<(), gifshelf::GifShelfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tracing::debug!(dir = ?dir, "initializing JSON slot storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file backing `slot`.
    ///
    /// Slot names are plain identifiers; anything that could escape the
    /// storage directory is rejected.
    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(GifShelfError::Storage(format!("invalid slot name: {slot:?}")));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl SlotStorage for JsonFileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;
        let _span = tracing::debug_span!("json_read_slot", path = ?path).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "slot loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("slot not present");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        let _span = tracing::debug_span!("json_write_slot", path = ?path, bytes = payload.len()).entered();

        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, payload)
            .map_err(|e| GifShelfError::Storage(format!("failed to write {}: {e}", tmp_path.display())))?;

        tracing::trace!("renaming temporary file to final location");
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(GifShelfError::Storage(format!("failed to replace {}: {e}", path.display())));
        }

        tracing::debug!("slot saved");
        Ok(())
    }
}
