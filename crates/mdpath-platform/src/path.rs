//! Normalization of locator-tool output into filesystem paths.

use std::path::PathBuf;

/// Convert raw locator output into a normalized absolute path.
///
/// Takes the first non-empty line, trims surrounding whitespace, and
/// resolves a relative path against the current working directory.
/// Returns `None` when the output carries no path at all.
pub fn normalize_output(raw: &str) -> Option<PathBuf> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let path = PathBuf::from(line);
    if path.is_absolute() {
        Some(path)
    } else {
        Some(std::path::absolute(&path).unwrap_or(path))
    }
}

/// Whether a path string is empty after trimming.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}
