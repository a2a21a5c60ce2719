//! Runtime configuration.
//!
//! Values come from [`ReaderConfig::default`], optionally overridden by a TOML
//! file, and finally by command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::DEFAULT_SEARCH_LIMIT;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Directory of `<key>.json` translation files
    pub data_dir: PathBuf,
    /// SQLite database; takes precedence over `data_dir` when set
    pub database: Option<PathBuf>,
    pub default_translation: String,
    pub addr: SocketAddr,
    pub search_limit: usize,
    pub max_search_limit: usize,
    /// Translations loaded at startup instead of on first request
    pub preload: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database: None,
            default_translation: "acf".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            search_limit: DEFAULT_SEARCH_LIMIT,
            max_search_limit: 100,
            preload: Vec::new(),
        }
    }
}

impl ReaderConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ReaderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_limit == 0 || self.max_search_limit == 0 {
            return Err(ConfigError::Invalid("search limits must be at least 1".to_string()));
        }
        if self.search_limit > self.max_search_limit {
            return Err(ConfigError::Invalid(format!(
                "search_limit ({}) exceeds max_search_limit ({})",
                self.search_limit, self.max_search_limit
            )));
        }
        if self.default_translation.trim().is_empty() {
            return Err(ConfigError::Invalid("default_translation is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.max_search_limit, 100);
        assert_eq!(config.default_translation, "acf");
        assert_eq!(config.addr.port(), 8080);
        assert!(config.database.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ReaderConfig::from_toml(
            r#"
            default_translation = "nvi"
            addr = "0.0.0.0:3000"
            preload = ["nvi", "acf"]
            "#,
        )
        .unwrap();

        assert_eq!(config.default_translation, "nvi");
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.preload, vec!["nvi", "acf"]);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.search_limit, 20);
    }

    #[test]
    fn test_invalid_limits() {
        let err = ReaderConfig::from_toml("search_limit = 50\nmax_search_limit = 10").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ReaderConfig::from_toml("addr = 12"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biblia.toml");
        std::fs::write(&path, "database = \"biblia.db\"").unwrap();

        let config = ReaderConfig::load(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("biblia.db")));
    }
}
