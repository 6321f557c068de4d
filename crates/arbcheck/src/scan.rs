//! ARB index scanners for XBL images and flashing scripts.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::error::{CheckError, Result};

/// Assignment that fastboot flashing scripts use to declare the ARB fence.
pub const ANTI_VER_MARKER: &str = "CURRENT_ANTI_VER=";

/// Seven zeros, one digit, eight zeros.
static ARB_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"0000000[0-9]00000000").unwrap());

const ALL_ZERO: &[u8] = b"0000000000000000";

/// Anti-rollback fence value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArbIndex(u32);

impl ArbIndex {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ArbIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an index was read from. Binary matches are heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexSource {
    Xbl,
    Script,
}

/// Search an XBL image for the embedded ARB marker.
///
/// Non-ASCII bytes are dropped before matching, so a marker split by them
/// still matches. Matches are leftmost and non-overlapping; the all-zero
/// match is skipped and the first remaining one wins.
pub fn scan_xbl_bytes(data: &[u8]) -> Option<ArbIndex> {
    let ascii: Vec<u8> = data.iter().copied().filter(u8::is_ascii).collect();

    let found = ARB_PATTERN
        .find_iter(&ascii)
        .map(|m| m.as_bytes())
        .find(|m| *m != ALL_ZERO)?;
    let digit = found.iter().find(|b| **b != b'0')?;
    Some(ArbIndex(u32::from(digit - b'0')))
}

pub fn scan_xbl_file(path: &Path) -> Result<Option<ArbIndex>> {
    let data = std::fs::read(path)?;
    let index = scan_xbl_bytes(&data);
    tracing::debug!(file = %path.display(), bytes = data.len(), ?index, "scanned xbl image");
    Ok(index)
}

/// Read the ARB index from a flashing script.
///
/// Takes the first line containing [`ANTI_VER_MARKER`]. A script without one
/// yields `None`; a marker with a non-numeric value is an error.
pub fn scan_script<R: BufRead>(mut reader: R) -> Result<Option<ArbIndex>> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buf);
        if let Some(pos) = line.find(ANTI_VER_MARKER) {
            let rest = &line[pos + ANTI_VER_MARKER.len()..];
            return parse_index(rest).map(Some);
        }
    }
}

pub fn scan_script_file(path: &Path) -> Result<Option<ArbIndex>> {
    let reader = BufReader::new(File::open(path)?);
    let index = scan_script(reader)?;
    tracing::debug!(file = %path.display(), ?index, "scanned flashing script");
    Ok(index)
}

/// Leading digits of the assignment value; trailing comments or words are ignored.
fn parse_index(raw: &str) -> Result<ArbIndex> {
    let value = raw
        .split('=')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches(['"', '\'']);
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());

    value[..end]
        .parse::<u32>()
        .map(ArbIndex)
        .map_err(|_| CheckError::InvalidIndex {
            value: value
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .trim_end_matches(['"', '\''])
                .to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xbl_index_found() {
        assert_eq!(
            scan_xbl_bytes(b"000000050000000000000000"),
            Some(ArbIndex::new(5))
        );
    }

    #[test]
    fn xbl_index_inside_binary_noise() {
        let mut data = vec![0x7f, b'E', b'L', b'F', 0x02, 0x01];
        data.extend_from_slice(b"OEM_ID");
        data.extend_from_slice(b"0000000200000000");
        data.extend_from_slice(&[0x00, 0xff, 0x13]);
        assert_eq!(scan_xbl_bytes(&data), Some(ArbIndex::new(2)));
    }

    #[test]
    fn xbl_all_zero_is_not_an_index() {
        assert_eq!(scan_xbl_bytes(b"0000000000000000"), None);
        assert_eq!(scan_xbl_bytes(b"no marker here"), None);
        assert_eq!(scan_xbl_bytes(b""), None);
    }

    #[test]
    fn xbl_all_zero_skipped_before_real_match() {
        assert_eq!(
            scan_xbl_bytes(b"00000000000000000000000300000000"),
            Some(ArbIndex::new(3))
        );
    }

    #[test]
    fn xbl_first_non_zero_match_wins() {
        assert_eq!(
            scan_xbl_bytes(b"0000000400000000 0000000700000000"),
            Some(ArbIndex::new(4))
        );
    }

    #[test]
    fn xbl_non_ascii_bytes_are_dropped() {
        let data = b"0000000\xe96\xff00000000";
        assert_eq!(scan_xbl_bytes(data), Some(ArbIndex::new(6)));
    }

    #[test]
    fn script_index_found() {
        let script = "#!/bin/sh\nCURRENT_ANTI_VER=3\nfastboot $* getvar anti\n";
        assert_eq!(
            scan_script(script.as_bytes()).unwrap(),
            Some(ArbIndex::new(3))
        );
    }

    #[test]
    fn script_without_marker_is_not_detected() {
        let script = "#!/bin/sh\nfastboot $* flash xbl `dirname $0`/images/xbl.elf\n";
        assert_eq!(scan_script(script.as_bytes()).unwrap(), None);
        assert_eq!(scan_script(&b""[..]).unwrap(), None);
    }

    #[test]
    fn batch_script_with_crlf() {
        let script = "@echo off\r\nset CURRENT_ANTI_VER=1\r\n";
        assert_eq!(
            scan_script(script.as_bytes()).unwrap(),
            Some(ArbIndex::new(1))
        );
    }

    #[test]
    fn quoted_value() {
        let script = "CURRENT_ANTI_VER=\"12\"\n";
        assert_eq!(
            scan_script(script.as_bytes()).unwrap(),
            Some(ArbIndex::new(12))
        );
    }

    #[test]
    fn first_marker_line_wins() {
        let script = "CURRENT_ANTI_VER=2\nCURRENT_ANTI_VER=9\n";
        assert_eq!(
            scan_script(script.as_bytes()).unwrap(),
            Some(ArbIndex::new(2))
        );
    }

    #[test]
    fn trailing_comment_is_ignored() {
        let script = "CURRENT_ANTI_VER=3 # fence\n";
        assert_eq!(scan_script(script.as_bytes()).unwrap(), Some(ArbIndex::new(3)));

        let script = "CURRENT_ANTI_VER=\"5\"; export CURRENT_ANTI_VER\n";
        assert_eq!(scan_script(script.as_bytes()).unwrap(), Some(ArbIndex::new(5)));
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let script = "CURRENT_ANTI_VER=$1\n";
        let result = scan_script(script.as_bytes());
        assert!(matches!(result, Err(CheckError::InvalidIndex { value }) if value == "$1"));
    }

    #[test]
    fn invalid_utf8_lines_are_tolerated() {
        let script = b"\xff\xfe garbage\nCURRENT_ANTI_VER=4\n";
        assert_eq!(scan_script(&script[..]).unwrap(), Some(ArbIndex::new(4)));
    }

    #[test]
    fn script_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flash_all.sh");
        std::fs::write(&path, "CURRENT_ANTI_VER=5\n").unwrap();
        assert_eq!(scan_script_file(&path).unwrap(), Some(ArbIndex::new(5)));
    }
}
