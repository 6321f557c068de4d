use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format")]
    UnsupportedFormat,

    #[error("path traversal detected: entry '{entry}' escapes the extraction directory")]
    ZipSlip { entry: PathBuf },

    #[error("entry path '{entry}' is empty or contains a null byte")]
    InvalidPath { entry: String },

    #[error("no archive entry matched")]
    NoMatchingEntry,

    #[error("archive is corrupted")]
    Corrupted,

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("scratch directory operation failed: {source}")]
    ScratchFailed { source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
