//! Directory scanner with gitignore support.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{language_for_extension, SourceFile};
use crate::utils::{is_binary_file, normalize_path, read_text_lossy};

/// Directories that never contribute excerpt material.
const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "output",
    ".git",
    ".svn",
    ".hg",
    ".idea",
    ".vscode",
    ".vs",
    "__pycache__",
    ".pytest_cache",
    "target",
    "bin",
    "obj",
    "vendor",
    "bower_components",
    ".next",
    ".nuxt",
    ".output",
    "coverage",
    ".nyc_output",
    ".gradle",
    ".mvn",
    ".cache",
    ".tmp",
];

/// Extensions that are binary, media, or otherwise never text source.
const IGNORED_EXTENSIONS: &[&str] = &[
    "map", "lock", "exe", "dll", "so", "dylib", "o", "a", "png", "jpg", "jpeg", "gif", "svg",
    "ico", "bmp", "webp", "mp3", "mp4", "avi", "mov", "wav", "flac", "zip", "tar", "gz", "rar",
    "7z", "bz2", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "woff", "woff2", "ttf",
    "eot", "otf", "sqlite", "db", "mdb", "pyc", "pyo", "class",
];

const IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
];

/// Metadata for one discovered file.
#[derive(Debug, Clone, Serialize)]
pub struct FileMeta {
    #[serde(skip)]
    pub path: PathBuf,
    pub relative_path: String,
    pub name: String,
    pub ext: String,
    pub size: u64,
    pub language: &'static str,
}

impl FileMeta {
    /// Load the file's content, tolerant of non-UTF-8 encodings.
    pub fn read(&self) -> Result<SourceFile> {
        let (text, encoding) = read_text_lossy(&self.path)?;
        debug!(path = %self.relative_path, encoding, "read source file");
        Ok(SourceFile::new(self.relative_path.clone(), text))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub files_seen: usize,
    pub files_included: usize,
    pub skipped_ignored: usize,
    pub skipped_extension: usize,
    pub skipped_size: usize,
    pub skipped_binary: usize,
}

/// Per-extension aggregation for display and reports.
#[derive(Debug, Clone, Serialize)]
pub struct FileTypeSummary {
    pub ext: String,
    pub language: &'static str,
    pub count: usize,
    pub total_size: u64,
}

/// Walks a root directory and yields candidate files in deterministic
/// relative-path order.
pub struct FileScanner {
    root: PathBuf,
    include_extensions: Option<Vec<String>>,
    exclude_globs: Vec<String>,
    max_file_bytes: u64,
    respect_gitignore: bool,
    follow_symlinks: bool,
    stats: ScanStats,
}

impl FileScanner {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            include_extensions: None,
            exclude_globs: Vec::new(),
            max_file_bytes: 1_048_576, // 1MB
            respect_gitignore: true,
            follow_symlinks: false,
            stats: ScanStats::default(),
        }
    }

    /// Restrict to these extensions (with leading dot). `None` keeps every
    /// non-ignored text file.
    pub fn include_extensions(mut self, extensions: Option<Vec<String>>) -> Self {
        self.include_extensions = extensions.map(|exts| {
            exts.into_iter()
                .map(|e| {
                    let e = e.trim().to_ascii_lowercase();
                    if e.starts_with('.') || e.is_empty() {
                        e
                    } else {
                        format!(".{e}")
                    }
                })
                .collect()
        });
        self
    }

    pub fn exclude_globs(mut self, globs: Vec<String>) -> Self {
        self.exclude_globs = globs;
        self
    }

    pub fn max_file_bytes(mut self, max_bytes: u64) -> Self {
        self.max_file_bytes = max_bytes;
        self
    }

    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    fn build_exclude_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            if let Ok(glob) = Glob::new(pattern) {
                builder.add(glob);
            }
        }
        Ok(builder.build()?)
    }

    /// Scan the tree. Results are sorted by relative path so repeated runs
    /// over the same tree are identical.
    pub fn scan(&mut self) -> Result<Vec<FileMeta>> {
        self.stats = ScanStats::default();
        let exclude_globset = self.build_exclude_globset()?;

        let dir_filter = |entry: &ignore::DirEntry| -> bool {
            if entry.file_type().is_some_and(|t| t.is_dir()) {
                if let Some(name) = entry.file_name().to_str() {
                    if IGNORED_DIRS.contains(&name) {
                        return false;
                    }
                    if name.starts_with('.') && name != ".github" {
                        return false;
                    }
                }
            }
            true
        };

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .follow_links(self.follow_symlinks)
            .hidden(false)
            .parents(self.respect_gitignore)
            .filter_entry(dir_filter);

        let mut files: Vec<(PathBuf, String)> = Vec::new();

        for entry in builder.build().flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            self.stats.files_seen += 1;

            let Ok(rel) = path.strip_prefix(&self.root) else { continue };
            let rel_path = normalize_path(&rel.to_string_lossy());
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_string();

            if IGNORED_FILES.contains(&name.as_str()) || exclude_globset.is_match(&rel_path) {
                self.stats.skipped_ignored += 1;
                continue;
            }
            if !self.extension_allowed(path, &name) {
                self.stats.skipped_extension += 1;
                continue;
            }

            let Ok(metadata) = path.metadata() else { continue };
            if metadata.len() > self.max_file_bytes {
                self.stats.skipped_size += 1;
                continue;
            }
            if is_binary_file(path) {
                self.stats.skipped_binary += 1;
                continue;
            }

            files.push((path.to_path_buf(), rel_path));
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));

        let mut result = Vec::with_capacity(files.len());
        for (path, rel_path) in files {
            let Ok(metadata) = path.metadata() else { continue };
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_string();
            let ext = extension_of(&name);
            let bare = ext.strip_prefix('.').unwrap_or("");
            result.push(FileMeta {
                path,
                relative_path: rel_path,
                name,
                size: metadata.len(),
                language: language_for_extension(bare),
                ext,
            });
            self.stats.files_included += 1;
        }

        debug!(
            seen = self.stats.files_seen,
            included = self.stats.files_included,
            "scan complete"
        );
        Ok(result)
    }

    fn extension_allowed(&self, path: &Path, name: &str) -> bool {
        let name_lower = name.to_ascii_lowercase();
        if name_lower.ends_with(".min.js") || name_lower.ends_with(".min.css") {
            return false;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if IGNORED_EXTENSIONS.contains(&ext.as_str()) {
            return false;
        }

        match &self.include_extensions {
            Some(allowed) => {
                let dotted = if ext.is_empty() { String::new() } else { format!(".{ext}") };
                allowed.iter().any(|a| *a == dotted)
            }
            None => true,
        }
    }
}

fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Aggregate scanned files by extension, largest population first.
pub fn detect_types(files: &[FileMeta]) -> Vec<FileTypeSummary> {
    let mut by_ext: HashMap<&str, FileTypeSummary> = HashMap::new();
    for file in files {
        if file.ext.is_empty() {
            continue;
        }
        let entry = by_ext.entry(file.ext.as_str()).or_insert_with(|| FileTypeSummary {
            ext: file.ext.clone(),
            language: file.language,
            count: 0,
            total_size: 0,
        });
        entry.count += 1;
        entry.total_size += file.size;
    }

    let mut types: Vec<FileTypeSummary> = by_ext.into_values().collect();
    types.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.ext.cmp(&b.ext)));
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scans_sorted_and_skips_noise_dirs() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("src/lib.rs"), "pub fn x() {}\n").unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "noise").unwrap();
        fs::create_dir_all(root.join(".idea")).unwrap();
        fs::write(root.join(".idea/workspace.xml"), "<xml/>").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf()).respect_gitignore(false);
        let files = scanner.scan().unwrap();

        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["src/lib.rs", "src/main.rs"]);
    }

    #[test]
    fn extension_filter_applies() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.rs"), "fn a() {}").unwrap();
        fs::write(root.join("b.py"), "print()").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf())
            .respect_gitignore(false)
            .include_extensions(Some(vec!["rs".to_string()]));
        let files = scanner.scan().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "a.rs");
        assert_eq!(scanner.stats().skipped_extension, 1);
    }

    #[test]
    fn size_ceiling_and_binary_sniff() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("big.rs"), "x".repeat(2_000_000)).unwrap();
        fs::write(root.join("bin.rs"), [0u8, 1, 2, 3]).unwrap();
        fs::write(root.join("ok.rs"), "fn main() {}").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf())
            .respect_gitignore(false)
            .max_file_bytes(1_000_000);
        let files = scanner.scan().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "ok.rs");
        assert_eq!(scanner.stats().skipped_size, 1);
        assert_eq!(scanner.stats().skipped_binary, 1);
    }

    #[test]
    fn lockfiles_and_minified_assets_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("package-lock.json"), "{}").unwrap();
        fs::write(root.join("app.min.js"), "var a=1;").unwrap();
        fs::write(root.join("app.js"), "var a = 1;").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf()).respect_gitignore(false);
        let files = scanner.scan().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "app.js");
    }

    #[test]
    fn exclude_globs_filter_paths() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("gen")).unwrap();
        fs::write(root.join("gen/schema.rs"), "pub struct S;").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf())
            .respect_gitignore(false)
            .exclude_globs(vec!["gen/**".to_string()]);
        let files = scanner.scan().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "main.rs");
    }

    #[test]
    fn type_detection_aggregates_by_extension() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.rs"), "fn a() {}").unwrap();
        fs::write(root.join("b.rs"), "fn b() {}").unwrap();
        fs::write(root.join("c.py"), "print()").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf()).respect_gitignore(false);
        let files = scanner.scan().unwrap();
        let types = detect_types(&files);

        assert_eq!(types[0].ext, ".rs");
        assert_eq!(types[0].count, 2);
        assert_eq!(types[0].language, "Rust");
        assert_eq!(types[1].ext, ".py");
        assert_eq!(types[1].count, 1);
    }

    #[test]
    fn file_meta_reads_content() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("m.rs"), "fn main() {}\n").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf()).respect_gitignore(false);
        let files = scanner.scan().unwrap();
        let source = files[0].read().unwrap();
        assert_eq!(source.relative_path, "m.rs");
        assert_eq!(source.ext, ".rs");
        assert_eq!(source.text, "fn main() {}\n");
    }
}
