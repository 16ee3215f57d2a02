//! Line normalization: terminator folding, legal-header removal, import
//! filtering, whitespace and blank-line pruning, and the derived stats.

pub mod header;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{CleanStats, ExcerptOptions};

static IMPORT_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^import\s+",
        r"^(const|let|var)\s+.*=\s*require\s*\(",
        r"^from\s+\S+\s+import\s+",
        r"^#include\s+",
        r"^using\s+[\w.]+;?\s*$",
        r"^use\s+[\w:]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("import pattern"))
    .collect()
});

/// Apply the enabled normalization steps, in their fixed order.
pub fn clean_code(code: &str, options: &ExcerptOptions) -> String {
    let code = code.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = code.split('\n').collect();

    if options.remove_copyright_headers {
        lines = header::strip_legal_header(lines);
    }
    if options.remove_imports {
        lines.retain(|line| !is_import_line(line));
    }

    let mut lines: Vec<String> = if options.remove_trailing_whitespace {
        lines.into_iter().map(|line| line.trim_end().to_string()).collect()
    } else {
        lines.into_iter().map(str::to_string).collect()
    };
    if options.remove_empty_lines {
        lines.retain(|line| !line.trim().is_empty());
    }

    lines.join("\n")
}

/// Does this line look like an import/include/using/require statement?
pub fn is_import_line(line: &str) -> bool {
    let trimmed = line.trim();
    IMPORT_SHAPES.iter().any(|pattern| pattern.is_match(trimmed))
}

/// Derive line statistics from the original and cleaned text.
///
/// `comment_lines_removed` is `original - empty - cleaned`, an estimate:
/// with stripping disabled it will attribute other removals to comments.
/// That semantic is intentional.
pub fn code_stats(original: &str, cleaned: &str) -> CleanStats {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let original_line_count = original_lines.len();
    let empty_lines_removed =
        original_lines.iter().filter(|line| line.trim().is_empty()).count();
    let cleaned_line_count =
        cleaned.split('\n').filter(|line| !line.trim().is_empty()).count();

    let comment_lines_removed =
        original_line_count.saturating_sub(empty_lines_removed + cleaned_line_count);
    let reduction_percentage = if original_line_count > 0 {
        ((1.0 - cleaned_line_count as f64 / original_line_count as f64) * 100.0).round() as u32
    } else {
        0
    };

    CleanStats {
        original_line_count,
        cleaned_line_count,
        empty_lines_removed,
        comment_lines_removed,
        reduction_percentage,
    }
}
