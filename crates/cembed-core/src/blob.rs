//! Combined blob layout for combine mode.
//!
//! A [`CombinedBlob`] owns the loaded files in listing order and derives the
//! offset table from that same list, so offsets and blob bytes always agree.

use crate::naming::combine_identifier;
use crate::source::SourceFile;

/// Position of one file inside the combined blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetEntry {
    /// Sanitized identifier used in `g_embed_<identifier>_offset`
    pub identifier: String,
    /// Byte offset of the file's first byte within the blob
    pub offset: u64,
}

/// All files of a directory laid out back to back, without padding
#[derive(Debug, Clone, Default)]
pub struct CombinedBlob {
    files: Vec<SourceFile>,
    entries: Vec<OffsetEntry>,
    total_len: u64,
}

impl CombinedBlob {
    /// Lays out `files` in the given order
    pub fn new(files: Vec<SourceFile>) -> Self {
        let mut entries = Vec::with_capacity(files.len());
        let mut total_len = 0u64;

        for file in &files {
            let file_name = file
                .path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            entries.push(OffsetEntry {
                identifier: combine_identifier(&file_name),
                offset: total_len,
            });
            total_len += file.len() as u64;
        }

        Self {
            files,
            entries,
            total_len,
        }
    }

    /// Offset table in blob order
    pub fn entries(&self) -> &[OffsetEntry] {
        &self.entries
    }

    /// Files in blob order
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Total blob length in bytes
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Number of files in the blob
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
