//! Configuration loading
//!
//! Settings come from an optional TOML/YAML file merged under CLI flags
//! (CLI > file > defaults).

pub mod loader;

pub use loader::{load_config, Config, ConfigError};
