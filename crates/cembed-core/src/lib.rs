//! # cembed-core
//!
//! A library for turning binary files into C headers that embed their bytes
//! as `unsigned char` array literals.
//!
//! This crate provides the core functionality for:
//! - Deriving header paths, include guards and identifiers from source paths
//! - Embedding a single file into `<stem>_embed.h`
//! - Embedding every file of a directory, one header per file
//! - Combining every file of a directory into one blob with an offset table
//!
//! ## Architecture
//!
//! - [`naming`]: Path and identifier derivation
//! - [`source`]: Source loading and directory listing
//! - [`blob`]: Combined blob layout and offset table
//! - [`embed`]: Header rendering and the [`Embedder`] driver
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use cembed_core::{EmbedConfig, Embedder};
//! use std::path::Path;
//!
//! let embedder = Embedder::with_config(EmbedConfig::new().sorted(true))?;
//!
//! // assets/logo.png -> assets/logo_embed.h
//! let header = embedder.embed_file(Path::new("assets/logo.png"))?;
//! println!("{}", header.display());
//!
//! // every file of assets/ -> assets/assets_embed.h
//! let report = embedder.embed_combine(Path::new("assets"))?;
//! println!("{} files, {} bytes", report.file_count, report.total_len);
//! # Ok::<(), cembed_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod blob;
pub mod embed;
pub mod error;
pub mod naming;
pub mod source;

// Re-export primary types for convenience
pub use blob::{CombinedBlob, OffsetEntry};
pub use embed::{
    render_combined, render_single, BatchReport, CombineReport, EmbedConfig, Embedder,
    HeaderWriter,
};
pub use error::{Error, Result};
pub use source::SourceFile;

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
