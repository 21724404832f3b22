//! Shared fakes for unit tests.

use crate::domain::error::{GifShelfError, Result};
use crate::domain::{Item, ItemKind, Notice, Query, Rendition};
use crate::fetcher::{ContentSource, Endpoint};
use crate::platform::{Clipboard, FileSaver, Notifier, ShareTarget, StagedFile};
use crate::storage::SlotStorage;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// A gif item whose rendition is 200x200.
pub fn gif(id: &str) -> Item {
    Item::new(
        id,
        format!("{id} title"),
        Rendition {
            url: format!("https://media.giphy.com/media/{id}/200.gif"),
            width: 200,
            height: 200,
        },
        ItemKind::Gif,
    )
}

/// Slot storage whose every operation fails.
#[derive(Debug, Default)]
pub struct FailingStorage;

impl SlotStorage for FailingStorage {
    fn read(&self, _slot: &str) -> Result<Option<String>> {
        Err(GifShelfError::Storage("storage unavailable".into()))
    }

    fn write(&mut self, _slot: &str, _payload: &str) -> Result<()> {
        Err(GifShelfError::Storage("quota exceeded".into()))
    }
}

/// Keeps a scripted fetch blocked until released or dropped.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

/// Content source with canned responses and controllable timing.
///
/// Fetch responses are keyed by the trimmed query text, or by the endpoint
/// segment (`trending`, `random`) when the text is empty. Unscripted keys
/// answer with no items.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<HashMap<String, std::result::Result<Vec<Item>, String>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    downloads: Mutex<HashMap<String, std::result::Result<Vec<u8>, String>>>,
    calls: Mutex<Vec<Query>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, key: &str, response: Result<Vec<Item>>) {
        let response = response.map_err(|e| e.to_string());
        self.responses.lock().unwrap().insert(key.to_string(), response);
    }

    /// Blocks the next fetch for `key` until the returned gate is released.
    pub fn hold(&self, key: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        Gate(tx)
    }

    pub fn serve(&self, url: &str, bytes: Vec<u8>) {
        self.downloads.lock().unwrap().insert(url.to_string(), Ok(bytes));
    }

    pub fn fail_download(&self, url: &str, error: GifShelfError) {
        self.downloads.lock().unwrap().insert(url.to_string(), Err(error.to_string()));
    }

    pub fn calls(&self) -> Vec<Query> {
        self.calls.lock().unwrap().clone()
    }

    fn key(query: &Query) -> String {
        if query.has_text() {
            query.query.clone()
        } else {
            Endpoint::route(query).path_segment().to_string()
        }
    }
}

impl ContentSource for ScriptedSource {
    fn fetch(&self, query: Query) -> BoxFuture<'_, Result<Vec<Item>>> {
        let key = Self::key(&query);
        self.calls.lock().unwrap().push(query);
        let gate = self.gates.lock().unwrap().remove(&key);

        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            let response = self.responses.lock().unwrap().get(&key).cloned();
            match response {
                Some(Ok(items)) => Ok(items),
                Some(Err(message)) => Err(GifShelfError::Fetch(message)),
                None => Ok(Vec::new()),
            }
        }
        .boxed()
    }

    fn download(&self, url: String) -> BoxFuture<'_, Result<Vec<u8>>> {
        async move {
            let scripted = self.downloads.lock().unwrap().get(&url).cloned();
            match scripted {
                Some(Ok(bytes)) => Ok(bytes),
                Some(Err(message)) => Err(GifShelfError::Fetch(message)),
                None => Err(GifShelfError::Fetch(format!("no download scripted for {url}"))),
            }
        }
        .boxed()
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    fail: bool,
    writes: Mutex<Vec<String>>,
}

impl FakeClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'_, Result<()>> {
        async move {
            if self.fail {
                return Err(GifShelfError::Platform("clipboard denied".into()));
            }
            self.writes.lock().unwrap().push(text);
            Ok(())
        }
        .boxed()
    }
}

#[derive(Default)]
pub struct FakeShareTarget {
    available: bool,
    reject: bool,
    shared: Mutex<Vec<(String, String)>>,
}

impl FakeShareTarget {
    pub fn available() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            available: true,
            reject: true,
            ..Self::default()
        }
    }

    pub fn shared(&self) -> Vec<(String, String)> {
        self.shared.lock().unwrap().clone()
    }
}

impl ShareTarget for FakeShareTarget {
    fn is_available(&self) -> bool {
        self.available
    }

    fn share(&self, title: String, url: String) -> BoxFuture<'_, Result<()>> {
        async move {
            if self.reject {
                return Err(GifShelfError::Platform("share cancelled".into()));
            }
            self.shared.lock().unwrap().push((title, url));
            Ok(())
        }
        .boxed()
    }
}

/// File saver that keeps everything in memory and counts handle lifecycle calls.
#[derive(Default)]
pub struct FakeSaver {
    fail_save: bool,
    staged: Mutex<HashMap<PathBuf, Vec<u8>>>,
    staged_total: AtomicUsize,
    released_total: AtomicUsize,
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FakeSaver {
    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn staged_count(&self) -> usize {
        self.staged_total.load(Ordering::SeqCst)
    }

    pub fn released_count(&self) -> usize {
        self.released_total.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl FileSaver for FakeSaver {
    fn stage(&self, bytes: &[u8]) -> Result<StagedFile> {
        let n = self.staged_total.fetch_add(1, Ordering::SeqCst);
        let path = PathBuf::from(format!("staged-{n}"));
        self.staged.lock().unwrap().insert(path.clone(), bytes.to_vec());
        Ok(StagedFile::new(path))
    }

    fn save(&self, staged: &StagedFile, file_name: &str) -> Result<PathBuf> {
        if self.fail_save {
            return Err(GifShelfError::Platform("disk full".into()));
        }
        let bytes = self
            .staged
            .lock()
            .unwrap()
            .get(staged.path())
            .cloned()
            .ok_or_else(|| GifShelfError::Platform("unknown staged file".into()))?;
        self.saved.lock().unwrap().push((file_name.to_string(), bytes));
        Ok(PathBuf::from(file_name))
    }

    fn release(&self, staged: StagedFile) {
        self.staged.lock().unwrap().remove(staged.path());
        self.released_total.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
