//! Export command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use super::utils::{parse_csv, parse_dir_spec};
use crate::config::load_config;
use crate::domain::{DirectoryGroup, ExcerptOptions, ProcessedFile, SourceFile};
use crate::pipeline::{build_excerpt, build_flat_excerpt, process_files, process_group};
use crate::render::{write_excerpt, write_report};
use crate::scan::FileScanner;

#[derive(Args)]
pub struct ExportArgs {
    /// Root directory of the source tree
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Directory group with optional ratio, e.g. 'src=3' (repeatable).
    /// Without any, the whole tree is excerpted flat.
    #[arg(short = 'd', long = "dir", value_name = "REL[=RATIO]")]
    pub dirs: Vec<String>,

    /// Path to config file (code-excerpt.toml or .code-excerpt.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Include only these extensions (comma-separated, e.g. '.rs,.py')
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

    /// Lines per rendered page
    #[arg(long, value_name = "N")]
    pub lines_per_page: Option<usize>,

    /// Page budget for the excerpt
    #[arg(long, value_name = "N")]
    pub max_pages: Option<usize>,

    /// Keep comments instead of stripping them
    #[arg(long)]
    pub keep_comments: bool,

    /// Keep blank lines
    #[arg(long)]
    pub keep_empty_lines: bool,

    /// Keep trailing whitespace
    #[arg(long)]
    pub keep_trailing_whitespace: bool,

    /// Keep leading copyright/license header blocks
    #[arg(long)]
    pub keep_copyright_headers: bool,

    /// Drop import/include/using/require lines
    #[arg(long)]
    pub strip_imports: bool,

    /// Directory for output files
    #[arg(short = 'o', long, value_name = "DIR", default_value = "excerpt-out")]
    pub output_dir: PathBuf,

    /// Omit timestamps for reproducible diffs
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("cannot resolve path {}", args.path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let config = load_config(&root, args.config.as_deref())?;
    let options = merge_options(config.options.clone(), &args);

    let include_ext = parse_csv(&args.include_ext).or(config.include_extensions.clone());
    let exclude_glob = parse_csv(&args.exclude_glob).unwrap_or(config.exclude_globs.clone());
    let respect_gitignore = if args.no_gitignore { false } else { config.respect_gitignore };

    let mut scanner = FileScanner::new(root.clone())
        .include_extensions(include_ext)
        .exclude_globs(exclude_glob)
        .max_file_bytes(args.max_file_bytes.unwrap_or(config.max_file_bytes))
        .respect_gitignore(respect_gitignore)
        .follow_symlinks(args.follow_symlinks || config.follow_symlinks);
    let metas = scanner.scan()?;
    debug!(files = metas.len(), "scanned {}", root.display());

    let mut sources: Vec<SourceFile> = Vec::with_capacity(metas.len());
    for meta in &metas {
        sources.push(meta.read()?);
    }

    let excerpt_path = args.output_dir.join("excerpt.txt");
    let report_path = args.output_dir.join("report.json");

    if args.dirs.is_empty() {
        // flat mode: one ordered sequence, front/back cut when over budget
        let processed = process_files(sources, &options);
        let excerpt = build_flat_excerpt(&processed, &options);

        write_excerpt(&excerpt_path, &excerpt)?;
        let file_refs: Vec<&ProcessedFile> = processed.iter().collect();
        write_report(&report_path, &options, &excerpt, &[], &file_refs, !args.no_timestamp)?;

        println!("Excerpt: {} lines / {} pages", excerpt.line_count(), excerpt.total_pages);
        println!("Truncated: {}", if excerpt.truncated { "yes" } else { "no" });
    } else {
        let groups = collect_groups(&args.dirs, sources, &options)?;
        let (excerpt, plans) = build_excerpt(&groups, &options);

        write_excerpt(&excerpt_path, &excerpt)?;
        let file_refs: Vec<&ProcessedFile> =
            groups.iter().flat_map(|g| g.files.iter()).collect();
        write_report(&report_path, &options, &excerpt, &plans, &file_refs, !args.no_timestamp)?;

        println!("Excerpt: {} lines / {} pages", excerpt.line_count(), excerpt.total_pages);
        println!("Truncated: {}", if excerpt.truncated { "yes" } else { "no" });
        println!("Directories:");
        for plan in &plans {
            println!(
                "  {} (ratio {}): {} lines, {}/{} files{}",
                plan.path,
                plan.ratio,
                plan.allocated_lines,
                plan.allocated_files,
                plan.total_files,
                if plan.truncated { ", truncated" } else { "" }
            );
        }
    }

    println!("Wrote {}", excerpt_path.display());
    println!("Wrote {}", report_path.display());
    Ok(())
}

fn merge_options(mut options: ExcerptOptions, args: &ExportArgs) -> ExcerptOptions {
    if args.keep_comments {
        options.remove_comments = false;
    }
    if args.keep_empty_lines {
        options.remove_empty_lines = false;
    }
    if args.keep_trailing_whitespace {
        options.remove_trailing_whitespace = false;
    }
    if args.keep_copyright_headers {
        options.remove_copyright_headers = false;
    }
    if args.strip_imports {
        options.remove_imports = true;
    }
    if let Some(lines_per_page) = args.lines_per_page {
        options.lines_per_page = lines_per_page;
    }
    if let Some(max_pages) = args.max_pages {
        options.max_pages = max_pages;
    }
    options
}

/// Split the scanned files into the requested directory groups, in the
/// order the groups were given.
fn collect_groups(
    dir_specs: &[String],
    sources: Vec<SourceFile>,
    options: &ExcerptOptions,
) -> Result<Vec<DirectoryGroup>> {
    let mut specs: Vec<(String, f64)> = Vec::with_capacity(dir_specs.len());
    for spec in dir_specs {
        specs.push(parse_dir_spec(spec)?);
    }

    let mut buckets: Vec<Vec<SourceFile>> = specs.iter().map(|_| Vec::new()).collect();
    for source in sources {
        if let Some(idx) = specs.iter().position(|(dir, _)| in_directory(&source, dir)) {
            buckets[idx].push(source);
        }
    }

    let groups = specs
        .into_iter()
        .zip(buckets)
        .map(|((dir, ratio), files)| process_group(dir, ratio, files, options))
        .collect();
    Ok(groups)
}

fn in_directory(source: &SourceFile, dir: &str) -> bool {
    dir == "." || source.relative_path.starts_with(&format!("{dir}/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_membership() {
        let file = SourceFile::new("src/app/main.rs", "");
        assert!(in_directory(&file, "src"));
        assert!(in_directory(&file, "src/app"));
        assert!(in_directory(&file, "."));
        assert!(!in_directory(&file, "srcx"));
        assert!(!in_directory(&file, "tests"));
    }

    #[test]
    fn first_matching_group_claims_a_file() {
        let sources = vec![
            SourceFile::new("src/deep/a.rs", "fn a() {}\n"),
            SourceFile::new("src/b.rs", "fn b() {}\n"),
            SourceFile::new("tests/t.rs", "fn t() {}\n"),
        ];
        let options = ExcerptOptions::default();
        let groups = collect_groups(
            &["src/deep=2".to_string(), "src=1".to_string()],
            sources,
            &options,
        )
        .expect("groups");

        assert_eq!(groups[0].files.len(), 1);
        assert_eq!(groups[1].files.len(), 1);
        // tests/t.rs belongs to no group and is dropped
        assert_eq!(groups[0].ratio, 2.0);
    }
}
