//! The end-to-end pipeline: strip, normalize, order, allocate.
//!
//! Per-file work is pure and has no cross-file dependency, so it fans out
//! over rayon and collects back in input order. Allocation is inherently
//! global and runs only after every file's availability is known.

use rayon::prelude::*;
use tracing::debug;

use crate::allocate::{allocate_by_ratio, truncate_to_page_budget};
use crate::clean::{clean_code, code_stats};
use crate::domain::{
    AllocationPlan, DirectoryGroup, Excerpt, ExcerptOptions, ProcessedFile, SourceFile,
};
use crate::sort::sort_files;
use crate::strip::strip_comments;

/// Strip and normalize a single file.
pub fn process_file(file: &SourceFile, options: &ExcerptOptions) -> ProcessedFile {
    let stripped = if options.remove_comments {
        strip_comments(&file.text, &file.ext)
    } else {
        file.text.clone()
    };
    let cleaned = clean_code(&stripped, options);
    let stats = code_stats(&file.text, &cleaned);

    let mut lines: Vec<String> = cleaned
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    // comment removal can leave orphaned closing delimiters at the top of
    // a file; a file cannot start with them
    while lines.first().is_some_and(|line| is_closer_residue(line)) {
        lines.remove(0);
    }

    ProcessedFile {
        relative_path: file.relative_path.clone(),
        name: file.name.clone(),
        lines,
        stats,
    }
}

fn is_closer_residue(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.chars().all(|c| matches!(c, '}' | ']' | ')' | ',' | ';') || c.is_whitespace())
}

/// Sort, then strip and normalize a set of files in parallel. Results come
/// back in the sorted file order.
pub fn process_files(mut files: Vec<SourceFile>, options: &ExcerptOptions) -> Vec<ProcessedFile> {
    sort_files(&mut files);
    files.par_iter().map(|file| process_file(file, options)).collect()
}

/// Build one directory group from its raw files.
pub fn process_group(
    path: impl Into<String>,
    ratio: f64,
    files: Vec<SourceFile>,
    options: &ExcerptOptions,
) -> DirectoryGroup {
    let path = path.into();
    let processed = process_files(files, options);
    debug!(path = %path, files = processed.len(), "processed group");
    DirectoryGroup::new(path, ratio, processed)
}

/// Ratio mode: allocate the page budget across pre-built groups.
pub fn build_excerpt(
    groups: &[DirectoryGroup],
    options: &ExcerptOptions,
) -> (Excerpt, Vec<AllocationPlan>) {
    allocate_by_ratio(groups, options.lines_per_page, options.max_pages)
}

/// Flat mode: concatenate the processed files and cut front/back to the
/// page budget when they run over.
pub fn build_flat_excerpt(processed: &[ProcessedFile], options: &ExcerptOptions) -> Excerpt {
    let lines: Vec<String> =
        processed.iter().flat_map(|file| file.lines.iter().cloned()).collect();
    truncate_to_page_budget(lines, options.lines_per_page, options.max_pages)
}
