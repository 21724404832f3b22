//! `reqwest`-based [`ContentSource`] for the GIPHY API.

use crate::domain::error::{GifShelfError, Result};
use crate::domain::{Item, Query};
use crate::fetcher::endpoint::{request_url, Endpoint};
use crate::fetcher::source::ContentSource;
use crate::fetcher::upstream::{normalize, UpstreamResponse};
use crate::Config;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::time::Duration;
use tracing::Instrument;

/// Longest upstream error body kept in diagnostics.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for the upstream search API.
///
/// The API key and rating come from static configuration and are attached to
/// every request; they are never user supplied.
#[derive(Debug, Clone)]
pub struct GiphyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    rating: String,
}

impl GiphyClient {
    /// Builds a client from configuration.
    ///
    /// The HTTP client carries the configured timeout as a backstop; the
    /// controller applies its own timeout around each fetch as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            tracing::warn!("no api_key configured, upstream requests will be rejected");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            rating: config.rating.clone(),
        })
    }

    async fn get_checked(&self, url: reqwest::Url) -> Result<reqwest::Response> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => format!("failed to read error response body: {}", err.without_url()),
        };
        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        Err(GifShelfError::Fetch(format!("upstream returned {status}: {body}")))
    }

    async fn fetch_items(&self, query: Query) -> Result<Vec<Item>> {
        let url = request_url(&self.base_url, &self.api_key, &self.rating, &query)?;
        let bytes = self.get_checked(url).await?.bytes().await?;
        let response: UpstreamResponse = serde_json::from_slice(&bytes)
            .map_err(|e| GifShelfError::Fetch(format!("malformed upstream payload: {e}")))?;

        Ok(normalize(response))
    }

    async fn download_bytes(&self, url: String) -> Result<Vec<u8>> {
        let url = reqwest::Url::parse(&url)
            .map_err(|e| GifShelfError::Fetch(format!("invalid media url {url:?}: {e}")))?;
        let bytes = self.get_checked(url).await?.bytes().await?;
        tracing::debug!(bytes = bytes.len(), "media downloaded");
        Ok(bytes.to_vec())
    }
}

impl ContentSource for GiphyClient {
    fn fetch(&self, query: Query) -> BoxFuture<'_, Result<Vec<Item>>> {
        let span = tracing::debug_span!(
            "upstream_fetch",
            category = ?query.category,
            endpoint = ?Endpoint::route(&query),
            query_len = query.query.len()
        );
        self.fetch_items(query).instrument(span).boxed()
    }

    fn download(&self, url: String) -> BoxFuture<'_, Result<Vec<u8>>> {
        self.download_bytes(url).boxed()
    }
}
