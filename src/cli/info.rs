//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::parse_csv;
use crate::scan::{detect_types, FileScanner};
use crate::sort::sort_by_weight;

#[derive(Args)]
pub struct InfoArgs {
    /// Local directory path to analyze
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Include only these extensions (comma-separated)
    #[arg(short = 'i', long, value_name = "EXTS")]
    pub include_ext: Option<String>,

    /// Exclude paths matching these globs (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS")]
    pub exclude_glob: Option<String>,

    /// Skip files larger than this (bytes)
    #[arg(long, value_name = "BYTES")]
    pub max_file_bytes: Option<u64>,

    /// Ignore .gitignore rules
    #[arg(long)]
    pub no_gitignore: bool,

    /// Follow symbolic links when scanning
    #[arg(long)]
    pub follow_symlinks: bool,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let root = args.path.canonicalize()?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let mut scanner = FileScanner::new(root.clone())
        .include_extensions(parse_csv(&args.include_ext))
        .exclude_globs(parse_csv(&args.exclude_glob).unwrap_or_default())
        .max_file_bytes(args.max_file_bytes.unwrap_or(1_048_576))
        .respect_gitignore(!args.no_gitignore)
        .follow_symlinks(args.follow_symlinks);

    let mut files = scanner.scan()?;
    let stats = scanner.stats().clone();

    let repo_name = root.file_name().and_then(|n| n.to_str()).unwrap_or("");
    println!("Source tree: {}", repo_name);

    let types = detect_types(&files);
    if !types.is_empty() {
        println!("File types:");
        for t in &types {
            println!("  {} ({}): {} files, {} bytes", t.ext, t.language, t.count, t.total_size);
        }
    }

    // preview the excerpt order: what it opens and closes with
    sort_by_weight(&mut files, |f| {
        (f.relative_path.as_str(), f.name.as_str(), f.ext.as_str())
    });
    if !files.is_empty() {
        println!("Excerpt opens with:");
        for file in files.iter().take(10) {
            println!("  {}", file.relative_path);
        }
        if files.len() > 10 {
            println!("Excerpt closes with:");
            for file in files.iter().rev().take(5).rev() {
                println!("  {}", file.relative_path);
            }
        }
    }

    println!("Statistics:");
    println!("  Files seen: {}", stats.files_seen);
    println!("  Files included: {}", stats.files_included);
    println!("  Skipped (ignored): {}", stats.skipped_ignored);
    println!("  Skipped (extension): {}", stats.skipped_extension);
    println!("  Skipped (size): {}", stats.skipped_size);
    println!("  Skipped (binary): {}", stats.skipped_binary);

    Ok(())
}
