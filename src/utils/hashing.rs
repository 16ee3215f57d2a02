//! Stable file identifiers

use sha2::{Digest, Sha256};

/// Stable id for a file: first 16 hex chars of the SHA-256 of its
/// forward-slash relative path. Survives re-scans and re-orderings.
pub fn stable_file_id(relative_path: &str) -> String {
    let digest = Sha256::digest(relative_path.as_bytes());
    format!("{digest:x}")[..16].to_string()
}
