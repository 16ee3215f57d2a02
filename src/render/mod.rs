//! Output rendering: the excerpt text file and the JSON report.
//!
//! The downstream document renderer paginates the excerpt itself; this
//! module only hands it the flat line sequence and the numbers it needs
//! for pagination and summary display.

pub mod report;

use anyhow::Result;
use std::path::Path;

use crate::domain::Excerpt;

pub use report::write_report;

/// Write the excerpt lines as plain text, one line per excerpt line.
pub fn write_excerpt(path: &Path, excerpt: &Excerpt) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut text = excerpt.lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_lines_with_trailing_newline() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("out/excerpt.txt");
        let excerpt = Excerpt {
            lines: vec!["a".to_string(), "b".to_string()],
            total_pages: 1,
            truncated: false,
        };
        write_excerpt(&path, &excerpt).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "a\nb\n");
    }

    #[test]
    fn empty_excerpt_writes_empty_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("excerpt.txt");
        write_excerpt(&path, &Excerpt::default()).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "");
    }
}
