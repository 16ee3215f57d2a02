//! Encoding-tolerant file reading.
//!
//! Source trees are rarely uniform UTF-8. Reading never hard-fails on a
//! decodable file: BOMs are honored, strict UTF-8 is the fast path, and
//! everything else goes through chardetng detection with a lossy
//! encoding_rs decode as the last resort.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const SAMPLE_SIZE: usize = 8192;

/// Read a file as text, tolerating non-UTF-8 encodings.
///
/// Returns the decoded content and the label of the encoding used.
pub fn read_text_lossy(path: &Path) -> Result<(String, &'static str)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    // BOMs are the most reliable signal
    if bytes.starts_with(&[0xef, 0xbb, 0xbf]) {
        let (text, _, _) = UTF_8.decode(&bytes[3..]);
        return Ok((text.into_owned(), "utf-8-sig"));
    }
    if bytes.starts_with(&[0xff, 0xfe]) {
        let (text, _, _) = UTF_16LE.decode(&bytes[2..]);
        return Ok((text.into_owned(), "utf-16-le"));
    }
    if bytes.starts_with(&[0xfe, 0xff]) {
        let (text, _, _) = UTF_16BE.decode(&bytes[2..]);
        return Ok((text.into_owned(), "utf-16-be"));
    }

    // Strict UTF-8 fast path covers most modern source files
    match String::from_utf8(bytes) {
        Ok(text) => Ok((text, "utf-8")),
        Err(err) => {
            let bytes = err.into_bytes();
            let encoding = detect_encoding(&bytes);
            let (text, _, _) = encoding.decode(&bytes);
            Ok((text.into_owned(), encoding.name()))
        }
    }
}

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Content-sniff for binary files: null bytes, or less than 70% printable
/// ASCII in the first sample, mark a file as binary.
pub fn is_binary_file(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return true;
    };
    let mut sample = vec![0u8; SAMPLE_SIZE];
    let Ok(read) = file.read(&mut sample) else {
        return true;
    };
    sample.truncate(read);

    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    let printable =
        sample.iter().filter(|&&b| (32..=126).contains(&b) || matches!(b, 9 | 10 | 13)).count();
    (printable as f64 / sample.len() as f64) < 0.70
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_plain_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("fn main() {} // 🚀".as_bytes()).unwrap();
        file.flush().unwrap();

        let (text, label) = read_text_lossy(file.path()).unwrap();
        assert_eq!(text, "fn main() {} // 🚀");
        assert_eq!(label, "utf-8");
    }

    #[test]
    fn strips_utf8_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xef, 0xbb, 0xbf]).unwrap();
        file.write_all(b"hello").unwrap();
        file.flush().unwrap();

        let (text, label) = read_text_lossy(file.path()).unwrap();
        assert_eq!(text, "hello");
        assert_eq!(label, "utf-8-sig");
    }

    #[test]
    fn decodes_non_utf8_without_error() {
        let mut file = NamedTempFile::new().unwrap();
        // "café" in latin-1: 0xe9 is invalid as a lone UTF-8 byte
        file.write_all(&[b'c', b'a', b'f', 0xe9]).unwrap();
        file.flush().unwrap();

        let (text, _) = read_text_lossy(file.path()).unwrap();
        assert!(text.starts_with("caf"));
    }

    #[test]
    fn null_bytes_mean_binary() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x00, 0x01, 0x02]).unwrap();
        file.flush().unwrap();
        assert!(is_binary_file(file.path()));
    }

    #[test]
    fn text_is_not_binary() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"plain text content\n").unwrap();
        file.flush().unwrap();
        assert!(!is_binary_file(file.path()));
    }
}
