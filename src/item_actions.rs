//! Per-item operations: share, download and embed.
//!
//! [`ItemActions`] does not touch [`AppState`](crate::app::AppState); each
//! operation acts on a single [`Item`] through injected platform capabilities.
//! Favorite toggling goes through
//! [`Controller::toggle_favorite`](crate::app::Controller::toggle_favorite)
//! because it mutates view state.
//!
//! Platform failures are logged, reported through the [`Notifier`] and turned
//! into an outcome value. Nothing here returns an error to the caller.

use crate::domain::error::{GifShelfError, Result};
use crate::domain::{Item, Notice};
use crate::fetcher::ContentSource;
use crate::infrastructure::download_file_name;
use crate::platform::{Clipboard, FileSaver, Notifier, ShareTarget, StagedFile};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

pub const URL_COPIED_MESSAGE: &str = "URL copied to clipboard!";
pub const EMBED_COPIED_MESSAGE: &str = "Embed code copied to clipboard!";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download. Please try again.";
pub const SHARE_FAILED_MESSAGE: &str = "Failed to share. Please try again.";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard.";

/// Which path [`ItemActions::share`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the native share target.
    Shared,
    /// No share target; the URL went to the clipboard.
    Copied,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    Failed,
}

/// Item-level operations over injected capabilities.
#[derive(Clone)]
pub struct ItemActions {
    source: Arc<dyn ContentSource>,
    clipboard: Arc<dyn Clipboard>,
    share_target: Arc<dyn ShareTarget>,
    saver: Arc<dyn FileSaver>,
    notifier: Arc<dyn Notifier>,
}

impl ItemActions {
    #[must_use]
    pub fn new(
        source: Arc<dyn ContentSource>,
        clipboard: Arc<dyn Clipboard>,
        share_target: Arc<dyn ShareTarget>,
        saver: Arc<dyn FileSaver>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            clipboard,
            share_target,
            saver,
            notifier,
        }
    }

    /// Shares the item's display URL.
    ///
    /// Uses the native share target when available, otherwise copies the URL
    /// and notifies. Exactly one of the two paths runs; a failed share does
    /// not fall back to the clipboard.
    pub async fn share(&self, item: &Item) -> ShareOutcome {
        let url = item.rendition.url.clone();

        if self.share_target.is_available() {
            return match self.share_target.share(item.title.clone(), url).await {
                Ok(()) => ShareOutcome::Shared,
                Err(e) => {
                    tracing::warn!(item_id = %item.id, error = %e, "share failed");
                    self.notifier.notify(Notice::error(SHARE_FAILED_MESSAGE));
                    ShareOutcome::Failed
                }
            };
        }

        match self.clipboard.write_text(url).await {
            Ok(()) => {
                self.notifier.notify(Notice::info(URL_COPIED_MESSAGE));
                ShareOutcome::Copied
            }
            Err(e) => {
                tracing::warn!(item_id = %item.id, error = %e, "copying share url failed");
                self.notifier.notify(Notice::error(COPY_FAILED_MESSAGE));
                ShareOutcome::Failed
            }
        }
    }

    /// Downloads the item's rendition and saves it as `{title or "giphy"}.gif`.
    ///
    /// Once staging succeeded the staged handle is released on every path,
    /// including a failed save or a dropped future.
    pub async fn download(&self, item: &Item) -> DownloadOutcome {
        let span = tracing::debug_span!("download", item_id = %item.id);

        match self.try_download(item).instrument(span.clone()).await {
            Ok(path) => {
                span.in_scope(|| tracing::info!(path = %path.display(), "item downloaded"));
                DownloadOutcome::Saved(path)
            }
            Err(e) => {
                span.in_scope(|| tracing::error!(error = %e, "download failed"));
                self.notifier.notify(Notice::error(DOWNLOAD_FAILED_MESSAGE));
                DownloadOutcome::Failed
            }
        }
    }

    async fn try_download(&self, item: &Item) -> Result<PathBuf> {
        let bytes = self.source.download(item.rendition.url.clone()).await?;
        tracing::debug!(bytes = bytes.len(), "rendition fetched");

        let staged = StagedGuard::new(self.saver.as_ref(), self.saver.stage(&bytes)?);
        staged.save(&download_file_name(&item.title))
    }

    /// Copies [`embed_snippet`] for the item and notifies.
    ///
    /// Returns whether the clipboard accepted the text.
    pub async fn copy_embed_snippet(&self, item: &Item) -> bool {
        match self.clipboard.write_text(embed_snippet(item)).await {
            Ok(()) => {
                self.notifier.notify(Notice::info(EMBED_COPIED_MESSAGE));
                true
            }
            Err(e) => {
                tracing::warn!(item_id = %item.id, error = %e, "copying embed snippet failed");
                self.notifier.notify(Notice::error(COPY_FAILED_MESSAGE));
                false
            }
        }
    }
}

impl std::fmt::Debug for ItemActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemActions").finish_non_exhaustive()
    }
}

/// Releases a staged file when dropped.
struct StagedGuard<'a> {
    saver: &'a dyn FileSaver,
    staged: Option<StagedFile>,
}

impl<'a> StagedGuard<'a> {
    fn new(saver: &'a dyn FileSaver, staged: StagedFile) -> Self {
        Self {
            saver,
            staged: Some(staged),
        }
    }

    fn save(&self, file_name: &str) -> Result<PathBuf> {
        match &self.staged {
            Some(staged) => self.saver.save(staged, file_name),
            None => Err(GifShelfError::Platform("staged file already released".to_string())),
        }
    }
}

impl Drop for StagedGuard<'_> {
    fn drop(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.saver.release(staged);
        }
    }
}

/// Builds iframe markup embedding the item's display rendition.
///
/// Pure: depends only on the rendition's URL and dimensions. Double quotes in
/// the URL are escaped so the attribute cannot be broken out of.
///
/// # Examples
///
/// ```
/// use gifshelf::domain::{Item, ItemKind, Rendition};
/// use gifshelf::item_actions::embed_snippet;
///
/// let item = Item::new(
///     "abc",
///     "wave",
///     Rendition { url: "https://media.giphy.com/abc.gif".into(), width: 356, height: 200 },
///     ItemKind::Gif,
/// );
/// assert_eq!(
///     embed_snippet(&item),
///     r#"<iframe src="https://media.giphy.com/abc.gif" width="356" height="200" frameBorder="0" class="giphy-embed" allowFullScreen></iframe>"#,
/// );
/// ```
#[must_use]
pub fn embed_snippet(item: &Item) -> String {
    let rendition = &item.rendition;
    format!(
        r#"<iframe src="{}" width="{}" height="{}" frameBorder="0" class="giphy-embed" allowFullScreen></iframe>"#,
        rendition.url.replace('"', "&quot;"),
        rendition.width,
        rendition.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemKind, NoticeLevel};
    use crate::test_support::{gif, FakeClipboard, FakeSaver, FakeShareTarget, RecordingNotifier, ScriptedSource};

    struct Fixture {
        source: Arc<ScriptedSource>,
        clipboard: Arc<FakeClipboard>,
        share_target: Arc<FakeShareTarget>,
        saver: Arc<FakeSaver>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                source: Arc::new(ScriptedSource::new()),
                clipboard: Arc::new(FakeClipboard::default()),
                share_target: Arc::new(FakeShareTarget::unavailable()),
                saver: Arc::new(FakeSaver::default()),
                notifier: Arc::new(RecordingNotifier::default()),
            }
        }

        fn actions(&self) -> ItemActions {
            ItemActions::new(
                self.source.clone(),
                self.clipboard.clone(),
                self.share_target.clone(),
                self.saver.clone(),
                self.notifier.clone(),
            )
        }
    }

    #[tokio::test]
    async fn share_uses_native_target_when_available() {
        let mut fixture = Fixture::new();
        fixture.share_target = Arc::new(FakeShareTarget::available());
        let item = gif("a");

        assert_eq!(fixture.actions().share(&item).await, ShareOutcome::Shared);

        assert_eq!(fixture.share_target.shared(), vec![(item.title.clone(), item.rendition.url.clone())]);
        assert!(fixture.clipboard.writes().is_empty());
        assert!(fixture.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn share_falls_back_to_clipboard_and_notifies() {
        let fixture = Fixture::new();
        let item = gif("a");

        assert_eq!(fixture.actions().share(&item).await, ShareOutcome::Copied);

        assert_eq!(fixture.clipboard.writes(), vec![item.rendition.url.clone()]);
        assert!(fixture.share_target.shared().is_empty());
        assert_eq!(fixture.notifier.messages(), vec![URL_COPIED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn rejected_share_does_not_also_copy() {
        let mut fixture = Fixture::new();
        fixture.share_target = Arc::new(FakeShareTarget::rejecting());

        assert_eq!(fixture.actions().share(&gif("a")).await, ShareOutcome::Failed);

        assert!(fixture.clipboard.writes().is_empty());
        assert_eq!(fixture.notifier.notices()[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn download_saves_with_title_and_releases() {
        let fixture = Fixture::new();
        let item = Item::new("x", "party/time", gif("x").rendition, ItemKind::Gif);
        fixture.source.serve(&item.rendition.url, b"GIF89a".to_vec());

        let outcome = fixture.actions().download(&item).await;

        assert_eq!(outcome, DownloadOutcome::Saved(PathBuf::from("party_time.gif")));
        assert_eq!(fixture.saver.saved(), vec![("party_time.gif".to_string(), b"GIF89a".to_vec())]);
        assert_eq!(fixture.saver.staged_count(), 1);
        assert_eq!(fixture.saver.released_count(), 1);
        assert!(fixture.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn untitled_download_uses_default_name() {
        let fixture = Fixture::new();
        let item = Item::new("y", "", gif("y").rendition, ItemKind::Sticker);
        fixture.source.serve(&item.rendition.url, vec![1, 2, 3]);

        let outcome = fixture.actions().download(&item).await;

        assert_eq!(outcome, DownloadOutcome::Saved(PathBuf::from("giphy.gif")));
    }

    #[tokio::test]
    async fn failed_save_still_releases_staged_handle() {
        let mut fixture = Fixture::new();
        fixture.saver = Arc::new(FakeSaver::failing_save());
        let item = gif("a");
        fixture.source.serve(&item.rendition.url, vec![0; 4]);

        assert_eq!(fixture.actions().download(&item).await, DownloadOutcome::Failed);

        assert_eq!(fixture.saver.staged_count(), 1);
        assert_eq!(fixture.saver.released_count(), 1);
        assert_eq!(fixture.notifier.messages(), vec![DOWNLOAD_FAILED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn failed_transfer_notifies_without_staging() {
        let fixture = Fixture::new();
        let item = gif("a");
        fixture
            .source
            .fail_download(&item.rendition.url, GifShelfError::Fetch("404".into()));

        assert_eq!(fixture.actions().download(&item).await, DownloadOutcome::Failed);

        assert_eq!(fixture.saver.staged_count(), 0);
        assert_eq!(fixture.notifier.messages(), vec![DOWNLOAD_FAILED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn copy_embed_snippet_writes_markup_and_notifies() {
        let fixture = Fixture::new();
        let item = gif("a");

        assert!(fixture.actions().copy_embed_snippet(&item).await);

        assert_eq!(fixture.clipboard.writes(), vec![embed_snippet(&item)]);
        assert_eq!(fixture.notifier.messages(), vec![EMBED_COPIED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn clipboard_failure_is_reported() {
        let mut fixture = Fixture::new();
        fixture.clipboard = Arc::new(FakeClipboard::failing());

        assert!(!fixture.actions().copy_embed_snippet(&gif("a")).await);
        assert_eq!(fixture.notifier.messages(), vec![COPY_FAILED_MESSAGE.to_string()]);
    }

    #[test]
    fn embed_snippet_is_deterministic_and_escapes_quotes() {
        let mut item = gif("a");
        item.rendition.url = r#"https://x/a".gif"#.to_string();

        let snippet = embed_snippet(&item);
        assert_eq!(snippet, embed_snippet(&item));
        assert!(snippet.contains(r#"src="https://x/a&quot;.gif""#));
        assert!(snippet.contains(r#"width="200""#));
    }
}
