//! Structured logging to a rotating file.
//!
//! All crate logging goes through `tracing`. [`init_tracing`] installs a
//! subscriber that filters with an `EnvFilter` and formats events into
//! `{data_dir}/gifshelf.log`.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFile → gifshelf.log[.<timestamp>]
//! ```
//!
//! # Configuration
//!
//! The filter directive is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `file_writer`: Size-rotated file with bounded backups

mod file_writer;
pub mod init;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, LOG_FILE_NAME};
