//! File discovery: walking a source tree into excerpt input.

pub mod scanner;

pub use scanner::{detect_types, FileMeta, FileScanner, FileTypeSummary, ScanStats};
