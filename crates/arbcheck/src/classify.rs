//! Input classification by file name.

use std::path::Path;

use crate::error::{CheckError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Recovery ROM; the XBL images live under `firmware-update/`.
    RecoveryZip,
    /// Fastboot ROM; carries `flash_all.sh`.
    FastbootTgz,
    FlashScript,
    XblImage,
}

/// Checked in order; the first rule with a matching needle wins.
const RULES: &[(&[&str], InputKind)] = &[
    (&[".zip"], InputKind::RecoveryZip),
    (&[".tgz"], InputKind::FastbootTgz),
    (&[".sh", ".bat"], InputKind::FlashScript),
    (&["xbl"], InputKind::XblImage),
];

impl InputKind {
    pub fn banner(self) -> &'static str {
        match self {
            Self::RecoveryZip => "Checking ARB from Recovery ROM",
            Self::FastbootTgz => "Checking ARB from Fastboot ROM",
            Self::FlashScript => "Checking ARB from Fastboot Flashing Script",
            Self::XblImage => "Checking ARB from XBL file",
        }
    }
}

/// Classify a bare file name. Matching is a plain substring test.
pub fn classify_name(name: &str) -> Option<InputKind> {
    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| name.contains(*needle)))
        .map(|(_, kind)| *kind)
}

/// Classify the file at `path`, which must exist and be a regular file.
pub fn classify(path: &Path) -> Result<InputKind> {
    if !path.is_file() {
        return Err(CheckError::MissingFile(path.to_path_buf()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = classify_name(&name).ok_or_else(|| CheckError::UnsupportedInput {
        name: name.clone(),
    })?;
    tracing::debug!(file = %name, ?kind, "classified input");
    Ok(kind)
}
