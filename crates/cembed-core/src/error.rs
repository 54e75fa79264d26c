//! Error types for the cembed-core library.
//!
//! Every failure is tied to the path that caused it so callers can report it
//! and move on to the next file or directory.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cembed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all cembed operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source path is missing or is not a regular file
    #[error("'{path}' is not a file")]
    NotAFile {
        /// The offending path
        path: PathBuf,
    },

    /// Path given to a directory operation is not a directory
    #[error("'{path}' is not a directory")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// Failed to read a source file
    #[error("'{path}' can't be loaded: {source}")]
    LoadFailure {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write an embed header
    #[error("failed to write '{path}': {source}")]
    WriteFailure {
        /// Path to the header that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Source file name has no extension to replace
    #[error("'{path}' has no extension to replace with '_embed.h'")]
    MissingExtension {
        /// The offending path
        path: PathBuf,
    },

    /// No usable name could be derived from a directory path
    #[error("can't derive an embed name from directory '{path}'")]
    InvalidDirectoryName {
        /// The offending path
        path: PathBuf,
    },

    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Creates a new not-a-file error
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Creates a new not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Creates a new load error
    pub fn load_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LoadFailure {
            path: path.into(),
            source,
        }
    }

    /// Creates a new write error
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Creates a new missing-extension error
    pub fn missing_extension(path: impl Into<PathBuf>) -> Self {
        Self::MissingExtension { path: path.into() }
    }

    /// Creates a new invalid directory name error
    pub fn invalid_directory_name(path: impl Into<PathBuf>) -> Self {
        Self::InvalidDirectoryName { path: path.into() }
    }

    /// Creates a new configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns true for per-file faults that a directory batch skips over
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotAFile { .. }
                | Self::LoadFailure { .. }
                | Self::WriteFailure { .. }
                | Self::MissingExtension { .. }
        )
    }
}
