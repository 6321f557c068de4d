//! The classify → extract → scan pipeline.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use arbcheck_archive::{ScratchDir, extract_tar_member, extract_zip_members};

use crate::classify::{InputKind, classify};
use crate::error::{CheckError, Result};
use crate::scan::{ArbIndex, IndexSource, scan_script_file, scan_xbl_file};

const XBL_PREFIX: &str = "firmware-update/xbl.";
const FLASH_SCRIPT: &str = "flash_all.sh";

/// Settings for one check run.
#[derive(Clone, Debug, Default)]
pub struct CheckConfig {
    pub input: PathBuf,
    /// Parent for the scratch directory; the system temp dir when unset.
    pub scratch_root: Option<PathBuf>,
}

impl CheckConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            scratch_root: None,
        }
    }

    pub fn scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    fn scratch(&self) -> Result<ScratchDir> {
        let scratch = match &self.scratch_root {
            Some(root) => ScratchDir::new_in(root)?,
            None => ScratchDir::new()?,
        };
        Ok(scratch)
    }
}

/// The index found in one scanned file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub file: PathBuf,
    pub source: IndexSource,
    pub index: Option<ArbIndex>,
}

#[derive(Clone, Debug)]
pub struct CheckReport {
    pub kind: InputKind,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    /// First detected index across all scanned files.
    pub fn index(&self) -> Option<ArbIndex> {
        self.findings.iter().find_map(|f| f.index)
    }
}

/// Run a full check, writing the human-readable transcript to `out`.
///
/// The scratch directory, when one is needed, is gone by the time this returns.
pub fn run_check<W: Write>(config: &CheckConfig, out: &mut W) -> Result<CheckReport> {
    let kind = classify(&config.input)?;
    writeln!(out, "{}", kind.banner())?;

    let findings = match kind {
        InputKind::RecoveryZip => {
            let scratch = config.scratch()?;
            let findings = scan_recovery_zip(&config.input, &scratch, out)?;
            scratch.close()?;
            findings
        }
        InputKind::FastbootTgz => {
            let scratch = config.scratch()?;
            let findings = scan_fastboot_tgz(&config.input, &scratch, out)?;
            scratch.close()?;
            findings
        }
        InputKind::FlashScript | InputKind::XblImage => vec![scan_single(kind, &config.input)?],
    };

    let labelled = findings.len() > 1;
    for finding in &findings {
        write_finding(out, finding, labelled)?;
    }

    Ok(CheckReport { kind, findings })
}

fn scan_recovery_zip<W: Write>(
    input: &Path,
    scratch: &ScratchDir,
    out: &mut W,
) -> Result<Vec<Finding>> {
    let report = extract_zip_members(File::open(input)?, scratch.path(), |name| {
        name.starts_with(XBL_PREFIX)
    })
    .map_err(|e| match e {
        arbcheck_archive::Error::NoMatchingEntry => CheckError::NoXblInZip,
        other => other.into(),
    })?;
    writeln!(out, "xbl file extracted successfully.")?;
    tracing::info!(
        format = ?report.format,
        count = report.entry_count(),
        total_bytes = report.total_bytes,
        "extracted xbl images"
    );

    report
        .entries
        .iter()
        .map(|entry| -> Result<Finding> {
            tracing::debug!(
                entry = %entry.original_path.display(),
                size = entry.size,
                "scanning xbl image"
            );
            Ok(Finding {
                file: entry.original_path.clone(),
                source: IndexSource::Xbl,
                index: scan_xbl_file(entry.target())?,
            })
        })
        .collect()
}

fn scan_fastboot_tgz<W: Write>(
    input: &Path,
    scratch: &ScratchDir,
    out: &mut W,
) -> Result<Vec<Finding>> {
    let report = extract_tar_member(File::open(input)?, scratch.path(), |name| {
        name.contains(FLASH_SCRIPT)
    })
    .map_err(|e| match e {
        arbcheck_archive::Error::NoMatchingEntry => CheckError::NoFlashScript,
        other => other.into(),
    })?;
    writeln!(out, "flashing script extracted successfully.")?;

    report
        .entries
        .iter()
        .map(|entry| -> Result<Finding> {
            tracing::info!(
                format = ?report.format,
                script = entry.file_name().unwrap_or_default(),
                entry = %entry.original_path.display(),
                size = entry.size,
                "extracted flashing script"
            );
            Ok(Finding {
                file: entry.original_path.clone(),
                source: IndexSource::Script,
                index: scan_script_file(entry.target())?,
            })
        })
        .collect()
}

fn scan_single(kind: InputKind, input: &Path) -> Result<Finding> {
    let (source, index) = match kind {
        InputKind::XblImage => (IndexSource::Xbl, scan_xbl_file(input)?),
        _ => (IndexSource::Script, scan_script_file(input)?),
    };
    Ok(Finding {
        file: input.to_path_buf(),
        source,
        index,
    })
}

fn write_finding<W: Write>(out: &mut W, finding: &Finding, labelled: bool) -> Result<()> {
    if labelled {
        writeln!(out, "[{}]", finding.file.display())?;
    }

    match finding.index {
        Some(index) => {
            writeln!(out, "ARB index is: {index}")?;
            if finding.source == IndexSource::Xbl {
                writeln!(out, "Note: sometimes this can be inaccurate!")?;
                writeln!(
                    out,
                    "Be sure to check current anti number using fastboot or from XDA/MIUI forum."
                )?;
            }
        }
        None => {
            tracing::info!(file = %finding.file.display(), "no ARB marker found");
            writeln!(out, "No ARB detected!")?;
        }
    }
    Ok(())
}
