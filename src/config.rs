use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template: PathBuf,
    pub base_path: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("docs"),
            template: PathBuf::from("template.html"),
            base_path: "/".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults shipped in `default_config.toml`, validated by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::compiled_default());
        }
        let content = fs::read_to_string(path).map_err(Error::io(path))?;
        Self::from_toml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
