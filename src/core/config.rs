//! Configuration module for the dedup indexer
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Windows: %APPDATA%\dedup_indexer\config.toml
//! - Linux/macOS: ~/.config/dedup_indexer/config.toml
//!
//! CLI arguments override config file values (see the binary).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application name used for config directory
const APP_NAME: &str = "dedup_indexer";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default TCP port the query server listens on
pub const DEFAULT_PORT: u16 = 54321;

/// Default address the query server binds to
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Get the standard configuration directory for the application.
pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Query server settings
    pub server: ServerConfig,

    /// Crawl settings
    pub crawl: CrawlConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Query server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub bind: String,

    /// TCP port on which the server listens
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Crawl configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Directories to crawl into the index
    pub directories: Vec<PathBuf>,

    /// Whether to follow symbolic links
    pub follow_symlinks: bool,

    /// Maximum depth to descend below each root (unset = unlimited)
    pub max_depth: Option<usize>,

    /// File extensions to index (empty = all regular files)
    pub extensions: Vec<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            follow_symlinks: false,
            max_depth: None,
            extensions: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./config.toml (current directory - for development/override)
    /// 2. Standard config location
    ///
    /// If no config file is found, returns default configuration.
    pub fn load_default() -> Result<Self, ConfigError> {
        let local = PathBuf::from("./config.toml");
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Generate a default config file with comments
    pub fn generate_default_config() -> String {
        include_str!("../../config.example.toml").to_string()
    }
}

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path
    #[error("configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Failed to read the configuration file
    #[error("failed to read config file '{}': {1}", .0.display())]
    ReadError(PathBuf, String),

    /// Failed to parse the configuration file (invalid TOML)
    #[error("failed to parse config file '{}': {1}", .0.display())]
    ParseError(PathBuf, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 54321);
        assert!(config.crawl.directories.is_empty());
        assert!(!config.crawl.follow_symlinks);
        assert_eq!(config.crawl.max_depth, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let example = Config::generate_default_config();
        let config: Config = toml::from_str(&example).unwrap();
        assert_eq!(config.server.port, Config::default().server.port);
        assert_eq!(config.logging.level, Config::default().logging.level);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.server.port = 4242;
        config.crawl.directories = vec![PathBuf::from("/data/photos")];
        config.crawl.extensions = vec!["jpg".to_string(), "png".to_string()];

        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.port, 4242);
        assert_eq!(parsed.crawl.directories, config.crawl.directories);
        assert_eq!(parsed.crawl.extensions, config.crawl.extensions);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Config::load("/nonexistent/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not [valid toml").unwrap();
        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_, _))));
    }
}
