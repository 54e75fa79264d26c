//! Loading of source files and listing of directory entries.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// A source file fully buffered in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    data: Vec<u8>,
}

impl SourceFile {
    /// Creates a source file from bytes already in memory
    pub fn new(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }

    /// Reads the whole file at `path`.
    ///
    /// Fails with [`Error::NotAFile`] if `path` is not an existing regular
    /// file and with [`Error::LoadFailure`] if reading it fails.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::not_a_file(path));
        }

        let data = fs::read(path).map_err(|e| Error::load_failure(path, e))?;
        trace!("Read {} bytes from {}", data.len(), path.display());

        Ok(Self::new(path, data))
    }

    /// Path the file was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file content
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte length of the content
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for an empty file
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Lists the regular files directly inside `directory`.
///
/// Symlinks are followed, subdirectories are not descended into, and
/// `exclude` (compared by exact path equality) is left out. Entries that
/// can't be read are logged and skipped. With `sorted` the entries come back
/// ordered by file name, otherwise in the order the OS returns them.
pub fn list_files(directory: &Path, exclude: Option<&Path>, sorted: bool) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(Error::not_a_directory(directory));
    }

    let mut walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", directory.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if exclude == Some(path.as_path()) {
            debug!("Skipping embed output {}", path.display());
            continue;
        }

        files.push(path);
    }

    debug!("Listed {} file(s) in {}", files.len(), directory.display());
    Ok(files)
}
