//! code-excerpt: Turn a source tree into a bounded code excerpt
//!
//! This library distills a multi-language source tree into a comment-free,
//! representative excerpt of exact line/page length, for embedding in a
//! formatted document with a fixed page budget. Raw files go in; an ordered
//! line sequence with a per-directory allocation report comes out.

pub mod allocate;
pub mod clean;
pub mod cli;
pub mod config;
pub mod domain;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod sort;
pub mod strip;
pub mod utils;

pub use allocate::{allocate_by_ratio, truncate_to_page_budget};
pub use clean::{clean_code, code_stats};
pub use domain::{
    AllocationPlan, CleanStats, DirectoryGroup, Excerpt, ExcerptOptions, ProcessedFile, SourceFile,
};
pub use pipeline::{build_excerpt, build_flat_excerpt, process_file};
pub use sort::sort_files;
pub use strip::strip_comments;
