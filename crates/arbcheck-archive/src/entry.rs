use std::path::{Path, PathBuf};

use crate::format::ArchiveFormat;

/// A member written to disk during extraction.
#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub size: u64,
}

impl ExtractedEntry {
    pub fn new(original_path: PathBuf, target_path: PathBuf, size: u64) -> Self {
        Self {
            original_path,
            target_path,
            size,
        }
    }

    /// File name of the member as stored in the archive.
    pub fn file_name(&self) -> Option<&str> {
        self.original_path.file_name().and_then(|n| n.to_str())
    }

    pub fn target(&self) -> &Path {
        &self.target_path
    }
}

#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub format: ArchiveFormat,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

impl ArchiveReport {
    pub fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            total_bytes: 0,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ExtractedEntry) {
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
