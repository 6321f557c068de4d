use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug)]
pub struct SanitizedPath {
    pub original: PathBuf,
    pub resolved: PathBuf,
}

/// Resolve an archive entry name against `base`.
///
/// Rejects absolute names, drive prefixes and any `..` that climbs above the
/// archive root, so the resolved path always stays under `base`. Backslashes
/// are treated as separators since some zip writers emit them.
pub fn sanitize_path<B: AsRef<Path>>(entry_name: &str, base: B) -> Result<SanitizedPath> {
    let base = base.as_ref();
    if entry_name.contains('\0') {
        return Err(Error::InvalidPath {
            entry: entry_name.replace('\0', "\\0"),
        });
    }

    let original = PathBuf::from(entry_name.replace('\\', "/"));
    let normalized = normalize_entry_path(&original).ok_or_else(|| Error::ZipSlip {
        entry: original.clone(),
    })?;
    if normalized.as_os_str().is_empty() {
        return Err(Error::InvalidPath {
            entry: entry_name.to_owned(),
        });
    }

    let resolved = base.join(normalized);
    if !resolved.starts_with(base) {
        return Err(Error::ZipSlip { entry: original });
    }

    Ok(SanitizedPath { original, resolved })
}

/// Collapse `.` and `..` components, returning `None` if the path is rooted
/// or walks out of the root.
fn normalize_entry_path(path: &Path) -> Option<PathBuf> {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_base_path() -> &'static Path {
        if cfg!(windows) {
            Path::new("C:/scratch/arbcheck")
        } else {
            Path::new("/scratch/arbcheck")
        }
    }

    #[test]
    fn basic_path_sanitization() {
        let result = sanitize_path("firmware-update/xbl.elf", test_base_path()).unwrap();
        assert_eq!(result.original, Path::new("firmware-update/xbl.elf"));
        assert_eq!(
            result.resolved,
            test_base_path().join("firmware-update").join("xbl.elf")
        );
    }

    #[test]
    fn inner_parent_dir_stays_inside() {
        let result = sanitize_path("rom/images/../flash_all.sh", test_base_path()).unwrap();
        let relative = result.resolved.strip_prefix(test_base_path()).unwrap();
        assert_eq!(relative, Path::new("rom/flash_all.sh"));
    }

    #[test]
    fn parent_dir_escape_rejected() {
        let result = sanitize_path("../evil.sh", test_base_path());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));

        let result = sanitize_path("rom/../../evil.sh", test_base_path());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn backslash_escape_rejected() {
        let result = sanitize_path("..\\..\\evil.sh", test_base_path());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn absolute_path_rejected() {
        let result = sanitize_path("/etc/passwd", test_base_path());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn null_byte_rejected() {
        let result = sanitize_path("flash_all.sh\0.txt", test_base_path());
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn empty_path_rejected() {
        let result = sanitize_path("rom/..", test_base_path());
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn path_normalization() {
        let result = normalize_entry_path(Path::new("foo//bar/./baz/../qux")).unwrap();
        assert_eq!(result, Path::new("foo/bar/qux"));
    }
}
