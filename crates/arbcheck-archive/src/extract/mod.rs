//! Member extraction.
//!
//! Extraction is selective: callers pass a predicate over the entry name as
//! stored in the archive, and only matching regular files are written. Every
//! written path goes through [`sanitize_path`](crate::sanitize_path) first.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

#[cfg(feature = "tar")]
pub use self::tar::extract_tar_member;
#[cfg(feature = "zip")]
pub use self::zip::extract_zip_members;

/// Stream `reader` into a new file at `target`, creating parent directories.
fn write_member<R: Read + ?Sized>(reader: &mut R, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut out_file = File::create(target).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })?;
    io::copy(reader, &mut out_file).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })
}
