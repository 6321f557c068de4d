use std::io::{Read, Seek};
use std::path::Path;

use crate::entry::{ArchiveReport, ExtractedEntry};
use crate::error::{Error, Result};
use crate::format::{ArchiveFormat, detect_from_reader};
use crate::sanitize::sanitize_path;

use super::write_member;

/// Extract the first regular file whose path satisfies `select` into `destination`.
///
/// Every member header is sanitized, including ones that are not extracted,
/// so a single traversal entry rejects the whole archive. The compression
/// codec is sniffed from the stream.
pub fn extract_tar_member<R, F>(
    mut reader: R,
    destination: &Path,
    mut select: F,
) -> Result<ArchiveReport>
where
    R: Read + Seek,
    F: FnMut(&str) -> bool,
{
    let codec = match detect_from_reader(&mut reader)? {
        Some(ArchiveFormat::Tar(codec)) => codec,
        _ => return Err(Error::UnsupportedFormat),
    };
    let mut archive = ::tar::Archive::new(codec.decoder(reader)?);
    let mut report = ArchiveReport::new(ArchiveFormat::Tar(codec));

    for entry in archive.entries().map_err(|_| Error::Corrupted)? {
        let mut entry = entry.map_err(|_| Error::Corrupted)?;
        let name = entry
            .path()
            .map_err(|_| Error::Corrupted)?
            .to_string_lossy()
            .into_owned();
        let entry_type = entry.header().entry_type();
        let sanitized = match sanitize_path(&name, destination) {
            // `./` style root entries
            Err(Error::InvalidPath { .. }) if entry_type.is_dir() => continue,
            other => other?,
        };

        if !report.is_empty() || !entry_type.is_file() || !select(&name) {
            continue;
        }

        let size = write_member(&mut entry, &sanitized.resolved)?;
        tracing::debug!(entry = %name, size, "extracted tar member");
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
