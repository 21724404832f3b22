//! Gifshelf: controller core for a GIF and sticker browser.
//!
//! Gifshelf provides:
//! - Category, sort and free-text queries against the GIPHY API
//! - Ordering of overlapping fetches so only the latest request is applied
//! - A favorites set written through to durable storage on every change
//! - Item actions (share, download, embed) over injected platform capabilities

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation (external)                            │  ← Renders state,
//! └─────────────────────────────────────────────────────┘    dispatches intents
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling (pure)                            │
//! │  - Controller runtime (tokio tasks, fetch tokens)   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Fetcher       │   │ Storage       │   │ Item Actions  │
//! │ (fetcher/)    │   │ (storage/)    │   │ + platform/   │
//! │ - Routing     │   │ - Slots       │   │ - Share       │
//! │ - HTTP client │   │ - Favorites   │   │ - Download    │
//! │ - Normalizing │   │ - JSON files  │   │ - Embed       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Item, query and notice models (domain/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing + EnvFilter, rotating log file           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: State, events, actions and the controller runtime
//! - [`domain`]: Core types (Item, Query, Notice, errors)
//! - [`fetcher`]: Upstream routing, HTTP client and response normalization
//! - [`infrastructure`]: Platform directories and download file names
//! - [`item_actions`]: Share, download and embed operations
//! - [`observability`]: Tracing subscriber and log rotation
//! - [`platform`]: Capability traits for clipboard, share, files and notices
//! - [`storage`]: Slot storage backends and the favorites store
//!
//! # Configuration
//!
//! ```toml
//! api_key = "your-giphy-key"
//! rating = "g"
//! fetch_timeout_secs = 15
//! log_level = "debug"
//! ```
//!
//! Every key is optional; missing keys take the defaults documented on
//! [`Config`].
//!
//! # Example
//!
//! ```no_run
//! use gifshelf::{initialize, Config};
//! use gifshelf::domain::Category;
//!
//! # async fn run() -> gifshelf::Result<()> {
//! let config = Config::from_file("gifshelf.toml")?;
//! let mut controller = initialize(&config)?;
//!
//! controller.start();
//! controller.set_category(Category::Stickers);
//! controller.settle().await;
//!
//! for item in controller.state().visible_items() {
//!     println!("{} {}", item.id, item.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod fetcher;
pub mod infrastructure;
pub mod item_actions;
pub mod observability;
pub mod platform;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{handle_event, Action, AppState, Controller, Event, ViewMode};
pub use domain::{GifShelfError, Item, Result};
pub use item_actions::ItemActions;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com/v1";

/// Static configuration, loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream API key attached to every request. Default: empty.
    pub api_key: String,

    /// API root without trailing slash. Default: `https://api.giphy.com/v1`
    pub base_url: String,

    /// Content rating filter. Default: `"g"`
    pub rating: String,

    /// Upper bound on a single fetch, in seconds. Default: 15
    pub fetch_timeout_secs: u64,

    /// Directory for favorites slots and the log file.
    ///
    /// Default: platform local data directory joined with `gifshelf`.
    pub data_dir: PathBuf,

    /// Directory [`item_actions`] saves downloads into, created on first use.
    ///
    /// Default: platform download directory.
    pub download_dir: PathBuf,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            rating: "g".to_string(),
            fetch_timeout_secs: 15,
            data_dir: infrastructure::default_data_dir(),
            download_dir: infrastructure::default_download_dir(),
            log_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GifShelfError::Config`] on malformed TOML, wrongly typed keys,
    /// or a zero timeout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gifshelf::Config;
    ///
    /// let config = Config::from_toml_str("api_key = \"abc\"\nfetch_timeout_secs = 5").unwrap();
    /// assert_eq!(config.api_key, "abc");
    /// assert_eq!(config.fetch_timeout_secs, 5);
    /// assert_eq!(config.rating, "g");
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| GifShelfError::Config(e.to_string()))?;
        if config.fetch_timeout_secs == 0 {
            return Err(GifShelfError::Config("fetch_timeout_secs must be greater than zero".to_string()));
        }
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GifShelfError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| GifShelfError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Wires logging, storage and the HTTP client into a ready [`Controller`].
///
/// Favorites are loaded once here. No fetch runs until
/// [`Controller::start`]. Must be called from within a Tokio runtime.
///
/// # Errors
///
/// - [`GifShelfError::Io`] if the data directory cannot be created
/// - [`GifShelfError::Fetch`] if the HTTP client cannot be built
/// - [`GifShelfError::Config`] if there is no current Tokio runtime
pub fn initialize(config: &Config) -> Result<Controller> {
    observability::init_tracing(config);
    tracing::debug!(data_dir = %config.data_dir.display(), "initializing gifshelf");

    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| GifShelfError::Config(format!("no tokio runtime: {e}")))?;

    let storage = storage::JsonFileStorage::new(&config.data_dir)?;
    let store = storage::FavoritesStore::new(Box::new(storage));
    let source: Arc<dyn fetcher::ContentSource> = Arc::new(fetcher::GiphyClient::new(config)?);

    Ok(Controller::new(store, source, runtime, config.fetch_timeout()))
}

/// Builds [`ItemActions`] that save downloads into `config.download_dir`.
///
/// Pass [`Controller::source`] as `source` to share the controller's HTTP
/// client. The remaining capabilities come from the host.
///
/// # Errors
///
/// Returns [`GifShelfError::Io`] if the download directory cannot be created.
///
/// # Example
///
/// ```no_run
/// use gifshelf::platform::{Clipboard, LogNotifier, ShareTarget};
/// use gifshelf::{initialize, item_actions, Config};
/// use std::sync::Arc;
///
/// # fn wire(clipboard: Arc<dyn Clipboard>, share: Arc<dyn ShareTarget>) -> gifshelf::Result<()> {
/// let config = Config::default();
/// let controller = initialize(&config)?;
/// let actions = item_actions(&config, controller.source(), clipboard, share, Arc::new(LogNotifier))?;
/// # Ok(())
/// # }
/// ```
pub fn item_actions(
    config: &Config,
    source: Arc<dyn fetcher::ContentSource>,
    clipboard: Arc<dyn platform::Clipboard>,
    share_target: Arc<dyn platform::ShareTarget>,
    notifier: Arc<dyn platform::Notifier>,
) -> Result<ItemActions> {
    let saver = platform::DirectorySaver::new(&config.download_dir)?;
    tracing::debug!(download_dir = %saver.dir().display(), "item actions ready");
    Ok(ItemActions::new(source, clipboard, share_target, Arc::new(saver), notifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_actions::DownloadOutcome;
    use crate::test_support::{gif, FakeClipboard, FakeShareTarget, RecordingNotifier, ScriptedSource};

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.rating, "g");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(15));
        assert!(config.log_level.is_none());
    }

    #[test]
    fn malformed_or_invalid_config_is_rejected() {
        assert!(matches!(Config::from_toml_str("api_key = ["), Err(GifShelfError::Config(_))));
        assert!(matches!(Config::from_toml_str("fetch_timeout_secs = \"soon\""), Err(GifShelfError::Config(_))));
        assert!(matches!(Config::from_toml_str("fetch_timeout_secs = 0"), Err(GifShelfError::Config(_))));
    }

    #[test]
    fn from_file_reports_missing_file_as_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, GifShelfError::Config(_)));
    }

    #[test]
    fn initialize_requires_a_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        assert!(matches!(initialize(&config), Err(GifShelfError::Config(_))));
    }

    #[tokio::test]
    async fn initialize_loads_favorites_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let payload = serde_json::to_string(&vec![gif("kept")]).unwrap();
        std::fs::write(dir.path().join(format!("{}.json", storage::FAVORITES_SLOT)), payload).unwrap();

        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let controller = initialize(&config).unwrap();

        assert!(controller.state().is_favorite("kept"));
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test]
    async fn downloads_land_in_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            download_dir: dir.path().join("saved"),
            ..Config::default()
        };
        let item = gif("a");
        let source = Arc::new(ScriptedSource::new());
        source.serve(&item.rendition.url, b"GIF89a".to_vec());

        let actions = item_actions(
            &config,
            source,
            Arc::new(FakeClipboard::default()),
            Arc::new(FakeShareTarget::unavailable()),
            Arc::new(RecordingNotifier::default()),
        )
        .unwrap();

        let expected = config.download_dir.join("a title.gif");
        assert_eq!(actions.download(&item).await, DownloadOutcome::Saved(expected.clone()));
        assert_eq!(std::fs::read(expected).unwrap(), b"GIF89a");
    }
}
