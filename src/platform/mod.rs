//! Platform capabilities used by item actions.
//!
//! Sharing, clipboard access, saving files and showing notifications are
//! host-specific. The crate only depends on the traits in [`capabilities`];
//! the presentation layer injects implementations.
//!
//! # Modules
//!
//! - `capabilities`: [`Clipboard`], [`ShareTarget`], [`FileSaver`], [`Notifier`]
//! - `directory`: [`DirectorySaver`], a [`FileSaver`] writing into a local directory
//! - `log_notifier`: [`LogNotifier`], a [`Notifier`] that forwards to `tracing`

pub mod capabilities;
pub mod directory;
pub mod log_notifier;

pub use capabilities::{Clipboard, FileSaver, Notifier, ShareTarget, StagedFile};
pub use directory::DirectorySaver;
pub use log_notifier::LogNotifier;
