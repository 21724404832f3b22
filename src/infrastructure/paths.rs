//! Platform path resolution.
//!
//! Directories come from the `dirs` crate, so they follow each platform's
//! conventions (`~/.local/share` on Linux, `~/Library/Application Support` on
//! macOS, `%LOCALAPPDATA%` on Windows). When the platform reports nothing, the
//! current directory is used.

use std::path::PathBuf;

const APP_DIR: &str = "gifshelf";

/// Fallback stem when an item has no usable title.
pub const DEFAULT_FILE_STEM: &str = "giphy";

/// Longest stem kept from a title, in characters.
const MAX_STEM_CHARS: usize = 120;

/// Returns the directory holding favorites slots and the log file.
///
/// # Examples
///
/// ```
/// use gifshelf::infrastructure::default_data_dir;
///
/// assert!(default_data_dir().ends_with("gifshelf"));
/// ```
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the directory downloads are saved into.
#[must_use]
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Builds the file name a downloaded item is saved under.
///
/// Path separators, control characters and characters reserved on Windows are
/// replaced with `_`. Leading and trailing dots and whitespace are stripped. A
/// title that ends up empty falls back to `giphy`.
///
/// # Examples
///
/// ```
/// use gifshelf::infrastructure::download_file_name;
///
/// assert_eq!(download_file_name("dancing cat"), "dancing cat.gif");
/// assert_eq!(download_file_name("a/b:c"), "a_b_c.gif");
/// assert_eq!(download_file_name("   "), "giphy.gif");
/// ```
#[must_use]
pub fn download_file_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(MAX_STEM_CHARS)
        .collect();

    let stem = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };

    format!("{stem}.gif")
}
