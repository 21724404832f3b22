//! Content fetcher: upstream routing, HTTP client and normalization.
//!
//! # Architecture
//!
//! - `endpoint`: search vs. listing routing and request URL construction
//! - `upstream`: wire types and normalization into [`Item`](crate::domain::Item)s
//! - `source`: [`ContentSource`] trait, the seam used by the controller
//! - `client`: `reqwest` implementation of the trait
//! - `messages`: request/completion messages tagged with fetch tokens
//! - `handler`: timeout and failure collapsing at the fetcher boundary

pub mod client;
pub mod endpoint;
pub mod handler;
pub mod messages;
pub mod source;
pub mod upstream;

pub use client::GiphyClient;
pub use endpoint::{request_url, Endpoint};
pub use handler::execute;
pub use messages::{FetchCompleted, FetchOutcome, FetchRequest, FetchToken, FETCH_FAILED_MESSAGE};
pub use source::ContentSource;
