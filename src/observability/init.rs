//! Tracing subscriber setup.

use super::file_writer::RotatingFile;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "gifshelf.log";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Creates the data directory if needed. Logging is optional: if the
/// directory cannot be created, or a subscriber is already installed, the call
/// does nothing. Safe to call more than once.
///
/// # Example
///
/// ```no_run
/// use gifshelf::observability::init_tracing;
/// use gifshelf::Config;
///
/// let config = Config {
///     log_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_level.as_deref().unwrap_or(DEFAULT_LEVEL))
    });

    let file = RotatingFile::new(config.data_dir.join(LOG_FILE_NAME));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
