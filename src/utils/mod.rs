//! Shared helpers: path normalization, encoding-tolerant reads, stable ids.

pub mod encoding;
pub mod hashing;
pub mod paths;

pub use encoding::{is_binary_file, read_text_lossy};
pub use hashing::stable_file_id;
pub use paths::normalize_path;
