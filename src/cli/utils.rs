//! Shared CLI utilities.

use anyhow::{bail, Result};

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace
/// and discarding empty segments. Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

/// Parse a `--dir` spec of the form `REL` or `REL=RATIO`. The ratio
/// defaults to 1 and must be non-negative.
pub fn parse_dir_spec(spec: &str) -> Result<(String, f64)> {
    let (path, ratio) = match spec.rsplit_once('=') {
        Some((path, ratio_str)) => {
            let ratio: f64 = ratio_str
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid ratio '{ratio_str}' in --dir {spec}"))?;
            (path, ratio)
        }
        None => (spec, 1.0),
    };
    if ratio < 0.0 || !ratio.is_finite() {
        bail!("ratio must be a non-negative number in --dir {spec}");
    }
    let path = path.trim().trim_end_matches('/');
    if path.is_empty() {
        bail!("empty directory in --dir {spec}");
    }
    Ok((path.to_string(), ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_parsing() {
        assert_eq!(parse_csv(&None), None);
        assert_eq!(
            parse_csv(&Some(".rs, .py ,,".to_string())),
            Some(vec![".rs".to_string(), ".py".to_string()])
        );
    }

    #[test]
    fn dir_spec_with_and_without_ratio() {
        assert_eq!(parse_dir_spec("src").unwrap(), ("src".to_string(), 1.0));
        assert_eq!(parse_dir_spec("src=2.5").unwrap(), ("src".to_string(), 2.5));
        assert_eq!(parse_dir_spec("src/=0").unwrap(), ("src".to_string(), 0.0));
    }

    #[test]
    fn dir_spec_rejects_bad_input() {
        assert!(parse_dir_spec("src=abc").is_err());
        assert!(parse_dir_spec("src=-1").is_err());
        assert!(parse_dir_spec("=2").is_err());
    }
}
