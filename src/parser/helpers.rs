//! Helper functions shared by the vendor parsers and column readers.
//!
//! Both vendors write Latin-1 encoded files, and both encode dates and times
//! as runs of unsigned integers with vendor-specific separators. The helpers
//! here decode raw bytes and extract those integer runs.

use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;

/// Decode Latin-1 bytes to a `String`.
///
/// Latin-1 maps every byte to the Unicode code point of the same value, so
/// this is lossless and never fails.
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

static INT_RUN_RE: OnceLock<Regex> = OnceLock::new();

/// Extract all unsigned integer runs from a string.
///
/// `"2025-10-31"` yields `[2025, 10, 31]`; `"17:37:42"` yields `[17, 37, 42]`;
/// a blank or non-numeric string yields an empty vector. Runs too long for
/// `u32` are dropped.
pub fn int_fields(s: &str) -> Vec<u32> {
    let re = INT_RUN_RE.get_or_init(|| Regex::new(r"\d+").expect("integer run pattern"));
    re.find_iter(s)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Read one raw line (including any terminator) and decode it as Latin-1.
///
/// Returns `None` at end of file.
pub fn read_line_latin1<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf)?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(latin1_to_string(&buf)))
    }
}

/// Skip one raw line without decoding it. Returns false at end of file.
pub fn skip_line<R: BufRead>(reader: &mut R) -> std::io::Result<bool> {
    let mut buf = Vec::new();
    Ok(reader.read_until(b'\n', &mut buf)? > 0)
}
