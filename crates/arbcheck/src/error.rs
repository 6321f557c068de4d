//! Error types for ARB checks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("the file provided does not exist: '{}'", .0.display())]
    MissingFile(PathBuf),

    #[error(
        "the file to check must be a Recovery / Fastboot ROM, XBL file, or .sh/.bat flashing script, got '{name}'"
    )]
    UnsupportedInput { name: String },

    #[error("there's no xbl files to check in this ZIP")]
    NoXblInZip,

    #[error("there's no flashing script to check in this archive")]
    NoFlashScript,

    #[error("ARB value '{value}' is not a number")]
    InvalidIndex { value: String },

    #[error(transparent)]
    Archive(#[from] arbcheck_archive::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CheckError>;
