//! Anti-rollback (ARB) index checker.
//!
//! Reads the ARB fence a firmware package will set, before it is flashed:
//!
//! - Recovery ROM (`.zip`): scans the `firmware-update/xbl.*` images.
//! - Fastboot ROM (`.tgz`): reads `flash_all.sh`.
//! - Flashing script (`.sh`, `.bat`) or a bare XBL image, checked in place.
//!
//! The XBL scan is a heuristic string match and can be wrong; the script
//! value is authoritative.

pub use check::{CheckConfig, CheckReport, Finding, run_check};
pub use classify::{InputKind, classify, classify_name};
pub use error::{CheckError, Result};
pub use scan::{ArbIndex, IndexSource, scan_script, scan_script_file, scan_xbl_bytes, scan_xbl_file};

pub mod check;
pub mod classify;
mod error;
pub mod scan;
