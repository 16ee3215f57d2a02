//! Leading legal-notice block removal.

use once_cell::sync::Lazy;
use regex::Regex;

/// Only the first lines of a file are considered header territory.
const HEADER_SCAN_LINES: usize = 30;

static LEGAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)copyright",
        r"(?i)license",
        r"(?i)all rights reserved",
        r"(?i)licensed under",
        r"(?i)permission is hereby granted",
        r"(?i)\(c\)\s*\d{4}",
        r"(?i)©\s*\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("legal pattern"))
    .collect()
});

/// Remove a leading legal-notice block, if one is found.
///
/// The first matching line within the scan window anchors the block;
/// subsequent lines that look like comment continuation (`*`, `//`, `#`,
/// the literal `*/`, or blank) extend it. Every line up to and including
/// the last absorbed one is deleted.
pub fn strip_legal_header(lines: Vec<&str>) -> Vec<&str> {
    let mut end: Option<usize> = None;
    let mut in_block = false;

    for (idx, line) in lines.iter().take(HEADER_SCAN_LINES).enumerate() {
        let trimmed = line.trim();
        if LEGAL_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed)) {
            in_block = true;
            end = Some(idx);
        } else if in_block {
            if is_continuation(trimmed) {
                end = Some(idx);
            } else {
                break;
            }
        }
    }

    match end {
        Some(end) => lines[end + 1..].to_vec(),
        None => lines,
    }
}

fn is_continuation(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed == "*/"
        || trimmed.starts_with('*')
        || trimmed.starts_with("//")
        || trimmed.starts_with('#')
}
