//! Core data model shared across the pipeline.

use serde::{Deserialize, Serialize};

/// Raw input file. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the scan root, forward-slash separated.
    pub relative_path: String,
    /// File name with extension.
    pub name: String,
    /// Lowercase extension including the leading dot, or empty.
    pub ext: String,
    /// Raw text content.
    pub text: String,
}

impl SourceFile {
    pub fn new(relative_path: impl Into<String>, text: impl Into<String>) -> Self {
        let relative_path = crate::utils::normalize_path(&relative_path.into());
        let name = relative_path.rsplit('/').next().unwrap_or("").to_string();
        let ext = match name.rfind('.') {
            Some(idx) if idx > 0 => name[idx..].to_ascii_lowercase(),
            _ => String::new(),
        };
        Self { relative_path, name, ext, text: text.into() }
    }
}

/// Line statistics derived from one file's cleaning pass.
///
/// `comment_lines_removed` is an estimate (`original - empty - cleaned`),
/// not an exact count of removed comment lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanStats {
    pub original_line_count: usize,
    pub cleaned_line_count: usize,
    pub empty_lines_removed: usize,
    pub comment_lines_removed: usize,
    pub reduction_percentage: u32,
}

/// A file after stripping and normalization: only non-empty lines remain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub relative_path: String,
    pub name: String,
    pub lines: Vec<String>,
    pub stats: CleanStats,
}

impl ProcessedFile {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// A selected source subtree with its share of the page budget.
///
/// `files` must already be in [`crate::sort::sort_files`] order; `total_lines`
/// is the sum of the per-file line counts ("availability").
#[derive(Debug, Clone)]
pub struct DirectoryGroup {
    pub path: String,
    pub ratio: f64,
    pub files: Vec<ProcessedFile>,
    pub total_lines: usize,
}

impl DirectoryGroup {
    pub fn new(path: impl Into<String>, ratio: f64, files: Vec<ProcessedFile>) -> Self {
        let total_lines = files.iter().map(ProcessedFile::line_count).sum();
        Self { path: path.into(), ratio, files, total_lines }
    }
}

/// Per-directory outcome of the ratio allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub path: String,
    pub ratio: f64,
    /// Final line quota after rounding correction and redistribution.
    pub quota: usize,
    pub allocated_lines: usize,
    pub allocated_pages: usize,
    pub allocated_files: usize,
    pub total_files: usize,
    pub total_lines: usize,
    /// True iff not every file of the group made it into the excerpt.
    pub truncated: bool,
}

/// The final bounded line sequence handed to the rendering collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Excerpt {
    pub lines: Vec<String>,
    pub total_pages: usize,
    pub truncated: bool,
}

impl Excerpt {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

fn default_true() -> bool {
    true
}

fn default_lines_per_page() -> usize {
    50
}

fn default_max_pages() -> usize {
    80
}

/// Pipeline options. Field defaults match the documented configuration
/// surface: everything on except import removal, 50 lines x 80 pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptOptions {
    pub remove_comments: bool,
    pub remove_empty_lines: bool,
    pub remove_trailing_whitespace: bool,
    pub remove_imports: bool,
    pub remove_copyright_headers: bool,
    pub lines_per_page: usize,
    pub max_pages: usize,
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self {
            remove_comments: default_true(),
            remove_empty_lines: default_true(),
            remove_trailing_whitespace: default_true(),
            remove_imports: false,
            remove_copyright_headers: default_true(),
            lines_per_page: default_lines_per_page(),
            max_pages: default_max_pages(),
        }
    }
}

impl ExcerptOptions {
    /// Total line budget for the excerpt.
    pub fn line_budget(&self) -> usize {
        self.lines_per_page * self.max_pages
    }
}

/// Human-readable language label for a lowercase extension (without dot).
pub fn language_for_extension(ext: &str) -> &'static str {
    match ext {
        "js" => "JavaScript",
        "jsx" => "JavaScript (JSX)",
        "ts" => "TypeScript",
        "tsx" => "TypeScript (TSX)",
        "vue" => "Vue",
        "svelte" => "Svelte",
        "astro" => "Astro",
        "java" => "Java",
        "py" => "Python",
        "c" => "C",
        "h" => "C/C++ Header",
        "cpp" | "cc" | "cxx" => "C++",
        "hpp" => "C++ Header",
        "cs" => "C#",
        "go" => "Go",
        "rs" => "Rust",
        "rb" => "Ruby",
        "php" => "PHP",
        "swift" => "Swift",
        "kt" | "kts" => "Kotlin",
        "scala" => "Scala",
        "dart" => "Dart",
        "lua" => "Lua",
        "r" => "R",
        "m" => "Objective-C",
        "mm" => "Objective-C++",
        "pl" | "pm" => "Perl",
        "sh" | "bash" | "zsh" => "Shell",
        "bat" | "cmd" => "Batch",
        "ps1" => "PowerShell",
        "sql" => "SQL",
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "sass" => "Sass",
        "less" => "Less",
        "xml" => "XML",
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "toml" => "TOML",
        "md" => "Markdown",
        "txt" => "Text",
        "gradle" | "groovy" => "Groovy",
        "ex" | "exs" => "Elixir",
        "erl" | "hrl" => "Erlang",
        "hs" => "Haskell",
        "ml" => "OCaml",
        "fs" | "fsx" => "F#",
        "clj" | "cljs" => "Clojure",
        "proto" => "Protocol Buffers",
        "graphql" | "gql" => "GraphQL",
        "tf" => "Terraform",
        "prisma" => "Prisma",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_derives_name_and_extension() {
        let f = SourceFile::new("src\\app\\Main.KT", "fun main() {}");
        assert_eq!(f.relative_path, "src/app/Main.KT");
        assert_eq!(f.name, "Main.KT");
        assert_eq!(f.ext, ".kt");
    }

    #[test]
    fn source_file_without_extension() {
        let f = SourceFile::new("scripts/Makefile", "all:");
        assert_eq!(f.ext, "");
        // Dotfiles are not extensions
        let f = SourceFile::new(".gitignore", "target/");
        assert_eq!(f.ext, "");
    }

    #[test]
    fn default_options_match_documented_surface() {
        let opts = ExcerptOptions::default();
        assert!(opts.remove_comments);
        assert!(opts.remove_empty_lines);
        assert!(opts.remove_trailing_whitespace);
        assert!(!opts.remove_imports);
        assert!(opts.remove_copyright_headers);
        assert_eq!(opts.lines_per_page, 50);
        assert_eq!(opts.max_pages, 80);
        assert_eq!(opts.line_budget(), 4000);
    }

    #[test]
    fn group_availability_sums_file_lines() {
        let mk = |n: usize| ProcessedFile {
            relative_path: "a".into(),
            name: "a".into(),
            lines: vec!["x".to_string(); n],
            stats: CleanStats::default(),
        };
        let group = DirectoryGroup::new("src", 1.0, vec![mk(3), mk(7)]);
        assert_eq!(group.total_lines, 10);
    }
}
