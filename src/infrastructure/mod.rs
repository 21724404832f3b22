//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves platform directories for storage, logs and downloads, and turns
//! item titles into safe file names.

pub mod paths;

pub use paths::{default_data_dir, default_download_dir, download_file_name};
