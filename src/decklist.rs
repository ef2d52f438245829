//! Deck list parsing.
//!
//! One card reference per line. Leading quantities ("1 Krenko, Mob Boss")
//! and `#` comments are stripped, double-faced separators are normalized
//! to ` // `, and names are deduplicated in first-seen order.

use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\s+(.*)$").unwrap());
static FACE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*//\s*").unwrap());

/// Normalize one raw line into a canonical card name.
///
/// Returns `None` for blank lines and comment-only lines.
pub fn normalize_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    // Cut trailing comments
    let line = line.split('#').next().unwrap_or("").trim();

    // Strip a leading quantity token
    let line = match QUANTITY_RE.captures(line) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).trim(),
        None => line,
    };

    let name = FACE_SEPARATOR_RE.replace_all(line, " // ");
    if name.is_empty() {
        None
    } else {
        Some(name.into_owned())
    }
}

/// Read a deck list file and return the unique card names in first-seen order.
pub fn parse_names(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for line in content.lines() {
        if let Some(name) = normalize_line(line) {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    Ok(names)
}
