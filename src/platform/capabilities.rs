//! Capability traits injected into [`ItemActions`](crate::item_actions::ItemActions).

use crate::domain::error::Result;
use crate::domain::Notice;
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};

/// Writes text to the system clipboard.
pub trait Clipboard: Send + Sync {
    /// # Errors
    ///
    /// Returns [`GifShelfError::Platform`](crate::GifShelfError::Platform) if
    /// the clipboard is unavailable or rejects the write.
    fn write_text(&self, text: String) -> BoxFuture<'_, Result<()>>;
}

/// Native share sheet, when the host has one.
pub trait ShareTarget: Send + Sync {
    /// Whether [`ShareTarget::share`] can be called at all.
    fn is_available(&self) -> bool;

    /// Shares a titled link.
    ///
    /// # Errors
    ///
    /// Returns an error if the share was rejected or cancelled.
    fn share(&self, title: String, url: String) -> BoxFuture<'_, Result<()>>;
}

/// Handle to bytes staged by a [`FileSaver`] before they are saved.
///
/// Must be handed back through [`FileSaver::release`] once saving is done,
/// whether it succeeded or not.
#[derive(Debug, PartialEq, Eq)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Saves downloaded bytes under a user-visible name.
///
/// Saving is split into three steps mirroring a temporary-object lifecycle:
/// stage the bytes, save the staged content under a name, release the staged
/// handle.
pub trait FileSaver: Send + Sync {
    /// Stages `bytes` and returns a handle to them.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be staged.
    fn stage(&self, bytes: &[u8]) -> Result<StagedFile>;

    /// Saves staged content as `file_name` and returns where it landed.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn save(&self, staged: &StagedFile, file_name: &str) -> Result<PathBuf>;

    /// Frees the staged handle. Never fails; cleanup problems are logged.
    fn release(&self, staged: StagedFile);
}

/// Shows short notices to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
