//! Temporary JSONL files for exercising the I/O helpers.

use crate::event::Event;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// A temporary file that is deleted when dropped.
pub struct TempFilePath {
    _temp_file: NamedTempFile,
    path: PathBuf,
}

impl TempFilePath {
    /// Create an empty temporary file with the given extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn with_extension(extension: &str) -> std::io::Result<Self> {
        let temp_file = tempfile::Builder::new()
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self {
            _temp_file: temp_file,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A temporary directory that is deleted when dropped.
pub struct TempDirPath {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TempDirPath {
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path for `filename` inside this directory (not created).
    #[must_use]
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }
}

/// Write `items` to a fresh temporary `.jsonl` file, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be created or an item fails to serialize.
pub fn temp_jsonl<T: Serialize>(items: &[T]) -> anyhow::Result<TempFilePath> {
    let tmp = TempFilePath::with_extension("jsonl")?;
    let mut f = std::fs::File::create(tmp.path())?;
    for item in items {
        serde_json::to_writer(&mut f, item)?;
        f.write_all(b"\n")?;
    }
    f.flush()?;
    Ok(tmp)
}

/// Write events to a fresh temporary `.jsonl` file.
///
/// # Errors
///
/// See [`temp_jsonl`].
pub fn temp_events_jsonl(events: &[Event]) -> anyhow::Result<TempFilePath> {
    temp_jsonl(events)
}
