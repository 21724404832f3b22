//! [`FileSaver`] that writes downloads into a local directory.

use super::capabilities::{FileSaver, StagedFile};
use crate::domain::error::{GifShelfError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Gives up looking for a free `name (n).ext` after this many attempts.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Saves files into `dir`, never overwriting an existing file.
///
/// Staged bytes live in hidden `.part` files next to the destination so the
/// final copy stays on one filesystem. A name clash produces `name (1).gif`,
/// `name (2).gif` and so on.
#[derive(Debug)]
pub struct DirectorySaver {
    dir: PathBuf,
    next_stage: AtomicU64,
}

impl DirectorySaver {
    /// Creates a saver for `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`GifShelfError::Io`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            next_stage: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidate(&self, file_name: &str, attempt: u32) -> PathBuf {
        if attempt == 0 {
            return self.dir.join(file_name);
        }
        let path = Path::new(file_name);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name);
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.dir.join(format!("{stem} ({attempt}).{ext}")),
            None => self.dir.join(format!("{stem} ({attempt})")),
        }
    }

    fn create_unique(&self, file_name: &str) -> Result<(PathBuf, File)> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.candidate(file_name, attempt);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(GifShelfError::Platform(format!(
            "no free file name for {file_name} in {}",
            self.dir.display()
        )))
    }
}

impl FileSaver for DirectorySaver {
    fn stage(&self, bytes: &[u8]) -> Result<StagedFile> {
        let n = self.next_stage.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!(".gifshelf-{}-{n}.part", std::process::id()));
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "download staged");
        Ok(StagedFile::new(path))
    }

    fn save(&self, staged: &StagedFile, file_name: &str) -> Result<PathBuf> {
        let _span = tracing::debug_span!("save_download", file_name = %file_name).entered();

        let mut source = File::open(staged.path())?;
        let (path, mut dest) = self.create_unique(file_name)?;

        if let Err(e) = io::copy(&mut source, &mut dest).and_then(|_| dest.flush()) {
            let _ = fs::remove_file(&path);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), "download saved");
        Ok(path)
    }

    fn release(&self, staged: StagedFile) {
        match fs::remove_file(staged.path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %staged.path().display(), error = %e, "failed to release staged download"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn stage_save_release_leaves_only_the_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path()).unwrap();

        let staged = saver.stage(b"GIF89a").unwrap();
        let saved = saver.save(&staged, "cat.gif").unwrap();
        saver.release(staged);

        assert_eq!(saved, dir.path().join("cat.gif"));
        assert_eq!(fs::read(&saved).unwrap(), b"GIF89a");
        assert_eq!(entries(dir.path()), vec!["cat.gif"]);
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cat.gif"), b"old").unwrap();
        let saver = DirectorySaver::new(dir.path()).unwrap();

        let staged = saver.stage(b"new").unwrap();
        let first = saver.save(&staged, "cat.gif").unwrap();
        let second = saver.save(&staged, "cat.gif").unwrap();
        saver.release(staged);

        assert_eq!(first, dir.path().join("cat (1).gif"));
        assert_eq!(second, dir.path().join("cat (2).gif"));
        assert_eq!(fs::read(dir.path().join("cat.gif")).unwrap(), b"old");
    }

    #[test]
    fn releasing_missing_stage_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path()).unwrap();

        let staged = saver.stage(b"x").unwrap();
        let path = staged.path().to_path_buf();
        fs::remove_file(&path).unwrap();
        saver.release(staged);

        assert!(entries(dir.path()).is_empty());
    }
}
