//! Fetch execution at the fetcher boundary.
//!
//! [`execute`] runs one [`FetchRequest`] against a [`ContentSource`] under a
//! timeout and converts every failure into the single user-facing outcome. The
//! raw error is logged here and goes no further.

use crate::domain::error::{GifShelfError, Result};
use crate::domain::Item;
use crate::fetcher::messages::{FetchCompleted, FetchRequest};
use crate::fetcher::source::ContentSource;
use std::time::Duration;
use tracing::Instrument;

/// Runs `request` and returns its completion message.
///
/// A request that does not resolve within `timeout` is reported as failed.
/// There is no retry; the next attempt is triggered by the user or by a state
/// change.
pub async fn execute(source: &dyn ContentSource, request: FetchRequest, timeout: Duration) -> FetchCompleted {
    let span = tracing::debug_span!(
        "fetch_execute",
        token = request.token,
        category = ?request.query.category,
        sort_mode = ?request.query.sort_mode
    );

    async move {
        let token = request.token;
        let result = run_with_timeout(source, request, timeout).await;

        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "fetch succeeded");
                FetchCompleted::loaded(token, items)
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching content");
                FetchCompleted::failed(token)
            }
        }
    }
    .instrument(span)
    .await
}

async fn run_with_timeout(source: &dyn ContentSource, request: FetchRequest, timeout: Duration) -> Result<Vec<Item>> {
    match tokio::time::timeout(timeout, source.fetch(request.query)).await {
        Ok(result) => result,
        Err(_) => Err(GifShelfError::Fetch(format!(
            "request timed out after {}s",
            timeout.as_secs_f64()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Query, SortMode};
    use crate::fetcher::messages::{FetchOutcome, FETCH_FAILED_MESSAGE};
    use crate::test_support::{gif, ScriptedSource};

    fn request(token: u64, text: &str) -> FetchRequest {
        FetchRequest {
            token,
            query: Query::new(Category::Gifs, text, SortMode::Trending),
        }
    }

    #[tokio::test]
    async fn success_carries_items_and_token() {
        let source = ScriptedSource::new();
        source.respond("cat", Ok(vec![gif("a"), gif("b")]));

        let done = execute(&source, request(7, "cat"), Duration::from_secs(5)).await;

        assert_eq!(done.token, 7);
        assert_eq!(done.outcome, FetchOutcome::Loaded(vec![gif("a"), gif("b")]));
    }

    #[tokio::test]
    async fn errors_collapse_to_generic_message() {
        let source = ScriptedSource::new();
        source.respond("cat", Err(GifShelfError::Fetch("upstream returned 403 Forbidden: bad key".into())));

        let done = execute(&source, request(1, "cat"), Duration::from_secs(5)).await;

        assert_eq!(done.outcome, FetchOutcome::Failed(FETCH_FAILED_MESSAGE.to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_request_times_out() {
        let source = ScriptedSource::new();
        let _gate = source.hold("slow");

        let done = execute(&source, request(3, "slow"), Duration::from_secs(15)).await;

        assert_eq!(done.token, 3);
        assert!(matches!(done.outcome, FetchOutcome::Failed(_)));
    }
}
