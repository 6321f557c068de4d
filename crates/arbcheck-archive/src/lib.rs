//! Selective archive extraction with path sanitization and scratch staging.
//!
//! # Architecture
//!
//! - `format.rs` - Format detection and tar decompression
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `scratch.rs` - Self-removing scratch directory
//! - `extract/` - Per-format member extraction
//! - `entry.rs` - Extraction report types

pub use entry::{ArchiveReport, ExtractedEntry};
pub use error::{Error, Result};
pub use format::{ArchiveFormat, TarCompress, detect_format, detect_from_reader};
pub use sanitize::{SanitizedPath, sanitize_path};
pub use scratch::ScratchDir;

#[cfg(feature = "tar")]
pub use format::Decoder;

#[cfg(feature = "tar")]
pub use extract::extract_tar_member;
#[cfg(feature = "zip")]
pub use extract::extract_zip_members;

mod entry;
mod error;
pub mod extract;
mod format;
mod sanitize;
mod scratch;
