use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};

const SCRATCH_PREFIX: &str = "arbcheck-";

/// Temporary extraction directory, removed when dropped.
///
/// Every exit path releases it, including `?` returns and unwinding. Parent
/// directories created by [`ScratchDir::new_in`] are removed with it.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
    root: CreatedRoot,
}

/// Directories created for the scratch root, deepest first.
#[derive(Debug, Default)]
struct CreatedRoot {
    dirs: Vec<PathBuf>,
}

impl CreatedRoot {
    fn create(root: &Path) -> Result<Self> {
        let mut dirs = Vec::new();
        let mut current = Some(root);
        while let Some(path) = current {
            if path.as_os_str().is_empty() || path.exists() {
                break;
            }
            dirs.push(path.to_path_buf());
            current = path.parent();
        }

        if !dirs.is_empty() {
            std::fs::create_dir_all(root).map_err(|source| Error::DirectoryCreationFailed {
                path: root.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %root.display(), "created scratch root");
        }
        Ok(Self { dirs })
    }
}

impl Drop for CreatedRoot {
    fn drop(&mut self) {
        // Non-recursive: anything else put there since stays.
        for dir in &self.dirs {
            if std::fs::remove_dir(dir).is_err() {
                break;
            }
        }
    }
}

impl ScratchDir {
    /// Create a scratch directory under the system temp directory.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|source| Error::ScratchFailed { source })?;
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self {
            dir,
            root: CreatedRoot::default(),
        })
    }

    /// Create a scratch directory under `root`, creating `root` if needed.
    pub fn new_in(root: impl AsRef<Path>) -> Result<Self> {
        let root_path = root.as_ref();
        let root = CreatedRoot::create(root_path)?;
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(root_path)
            .map_err(|source| Error::ScratchFailed { source })?;
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self { dir, root })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting failures that `Drop` would swallow.
    pub fn close(self) -> Result<()> {
        let Self { dir, root } = self;
        let path = dir.path().to_path_buf();
        dir.close().map_err(|source| Error::ScratchFailed { source })?;
        drop(root);
        tracing::debug!(path = %path.display(), "removed scratch directory");
        Ok(())
    }
}
