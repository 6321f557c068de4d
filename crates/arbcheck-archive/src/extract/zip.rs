use std::io::{Read, Seek};
use std::path::Path;

use crate::entry::{ArchiveReport, ExtractedEntry};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::sanitize::sanitize_path;

use super::write_member;

/// Extract every zip file entry whose name satisfies `select` into `destination`.
///
/// Returns [`Error::NoMatchingEntry`] when nothing matched. Directory entries
/// are never written.
pub fn extract_zip_members<R, F>(
    reader: R,
    destination: &Path,
    mut select: F,
) -> Result<ArchiveReport>
where
    R: Read + Seek,
    F: FnMut(&str) -> bool,
{
    let mut archive = ::zip::ZipArchive::new(reader).map_err(|_| Error::Corrupted)?;
    let mut report = ArchiveReport::new(ArchiveFormat::Zip);

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|_| Error::Corrupted)?;
        if file.is_dir() || !select(file.name()) {
            continue;
        }

        let sanitized = sanitize_path(file.name(), destination)?;
        let size = write_member(&mut file, &sanitized.resolved)?;
        tracing::debug!(
            entry = %sanitized.original.display(),
            size,
            "extracted zip member"
        );

        report.push(ExtractedEntry::new(
            sanitized.original,
            sanitized.resolved,
            size,
        ));
    }

    if report.is_empty() {
        return Err(Error::NoMatchingEntry);
    }
    Ok(report)
}
