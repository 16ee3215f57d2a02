//! Config file discovery and parsing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::ExcerptOptions;

/// File-level configuration: the excerpt options plus scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub options: ExcerptOptions,
    pub include_extensions: Option<Vec<String>>,
    pub exclude_globs: Vec<String>,
    pub max_file_bytes: u64,
    pub respect_gitignore: bool,
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: ExcerptOptions::default(),
            include_extensions: None,
            exclude_globs: Vec::new(),
            max_file_bytes: 1_048_576,
            respect_gitignore: true,
            follow_symlinks: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {format} config {path}: {message}")]
    Parse { format: &'static str, path: PathBuf, message: String },
    #[error("unsupported config extension for {path}")]
    UnsupportedExtension { path: PathBuf },
}

const CONFIG_CANDIDATES: &[&str] = &[
    "code-excerpt.toml",
    ".code-excerpt.toml",
    "code-excerpt.yml",
    ".code-excerpt.yml",
    "code-excerpt.yaml",
    ".code-excerpt.yaml",
];

/// Load configuration for a scan root.
///
/// An explicitly given file that fails to read or parse is a hard error;
/// an auto-discovered one soft-fails to defaults with a warning, so a
/// stray config file never blocks an export.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let explicit_given = explicit.is_some();
    let Some(config_file) = explicit.map(Path::to_path_buf).or_else(|| discover(root)) else {
        return Ok(Config::default());
    };

    match parse_file(&config_file) {
        Ok(config) => Ok(config),
        Err(err) if explicit_given => Err(err),
        Err(err) => {
            tracing::warn!("ignoring unusable config {}: {err}", config_file.display());
            Ok(Config::default())
        }
    }
}

fn parse_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml(&content, path),
        "yml" | "yaml" => parse_yaml(&content, path),
        _ => Err(ConfigError::UnsupportedExtension { path: path.to_path_buf() }),
    }
}

/// Parse TOML, allowing the settings to live under a `[code-excerpt]`
/// or `[excerpt]` section as well as at top level.
fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let raw: toml::Value = toml::from_str(content).map_err(|e| ConfigError::Parse {
        format: "TOML",
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let value = raw
        .get("code-excerpt")
        .or_else(|| raw.get("excerpt"))
        .cloned()
        .unwrap_or(raw);

    value.try_into().map_err(|e: toml::de::Error| ConfigError::Parse {
        format: "TOML",
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_yaml(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        format: "YAML",
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let value = raw
        .get("code-excerpt")
        .or_else(|| raw.get("excerpt"))
        .cloned()
        .unwrap_or(raw);

    serde_yaml::from_value(value).map_err(|e| ConfigError::Parse {
        format: "YAML",
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn discover(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES.iter().map(|name| root.join(name)).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_nothing_found() {
        let tmp = TempDir::new().expect("tmp");
        let config = load_config(tmp.path(), None).expect("config");
        assert_eq!(config.max_file_bytes, 1_048_576);
        assert!(config.options.remove_comments);
        assert_eq!(config.options.lines_per_page, 50);
    }

    #[test]
    fn toml_top_level_keys() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("code-excerpt.toml"),
            "lines_per_page = 40\nmax_pages = 10\nremove_imports = true\nmax_file_bytes = 9999\n",
        )
        .expect("write");

        let config = load_config(tmp.path(), None).expect("config");
        assert_eq!(config.options.lines_per_page, 40);
        assert_eq!(config.options.max_pages, 10);
        assert!(config.options.remove_imports);
        assert_eq!(config.max_file_bytes, 9999);
    }

    #[test]
    fn toml_nested_section() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("proj.toml");
        fs::write(&path, "[code-excerpt]\nlines_per_page = 33\n").expect("write");

        let config = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(config.options.lines_per_page, 33);
    }

    #[test]
    fn yaml_config_parses() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("code-excerpt.yml"),
            "remove_comments: false\nexclude_globs:\n  - 'gen/**'\n",
        )
        .expect("write");

        let config = load_config(tmp.path(), None).expect("config");
        assert!(!config.options.remove_comments);
        assert_eq!(config.exclude_globs, vec!["gen/**".to_string()]);
    }

    #[test]
    fn explicit_bad_config_is_a_hard_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "lines_per_page = \"not a number\"\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn discovered_bad_config_soft_fails_to_defaults() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("code-excerpt.toml"), "lines_per_page = [1,2]\n")
            .expect("write");

        let config = load_config(tmp.path(), None).expect("soft-fail");
        assert_eq!(config.options.lines_per_page, 50);
    }

    #[test]
    fn explicit_unknown_extension_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("conf.ini");
        fs::write(&path, "x=1\n").expect("write");

        let err = load_config(tmp.path(), Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedExtension { .. }));
    }
}
