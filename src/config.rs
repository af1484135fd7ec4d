//! Configuration management for the RAX image server
//!
//! Built-in defaults, then an optional TOML file, then `RAX_IMAGES_*`
//! environment overrides. The resulting [`StoreConfig`] is passed explicitly
//! to the identity store, the object service and the HTTP server.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default config file looked up when no explicit path is given
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix (`RAX_IMAGES_DATA_ROOT`, ...)
pub const ENV_PREFIX: &str = "RAX_IMAGES";

/// Complete server and store configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per identity
    pub data_root: String,

    /// Object name suffixes accepted on upload
    pub allowed_extensions: Vec<String>,

    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port the HTTP listener binds to
    pub port: u16,

    /// Upper bound on a single request body, in MB
    pub max_upload_size_mb: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_root: "./files".to_string(),
            allowed_extensions: ["jpg", "jpeg", "gif", "png"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            max_upload_size_mb: 10,
        }
    }
}

impl StoreConfig {
    /// Load configuration with file and environment overrides.
    ///
    /// A missing config file is not an error; defaults and environment
    /// variables still apply.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let defaults = StoreConfig::default();
        let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .set_default("data_root", defaults.data_root)?
            .set_default("allowed_extensions", defaults.allowed_extensions)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", defaults.port as i64)?
            .set_default("max_upload_size_mb", defaults.max_upload_size_mb as i64)?
            .add_source(File::with_name(config_path).required(path.is_some()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_extensions"),
            )
            .build()?;

        let config: StoreConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_root.trim().is_empty() {
            return Err(ConfigError::Message("data_root cannot be empty".into()));
        }

        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::Message(
                "allowed_extensions must list at least one extension".into(),
            ));
        }

        if self.allowed_extensions.iter().any(|ext| ext.is_empty()) {
            return Err(ConfigError::Message(
                "allowed_extensions cannot contain an empty entry".into(),
            ));
        }

        if self.max_upload_size_mb == 0 {
            return Err(ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get data root as PathBuf
    pub fn data_root_path(&self) -> PathBuf {
        PathBuf::from(&self.data_root)
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get maximum upload size in bytes
    pub fn max_upload_size_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize) * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.allowed_extensions, vec!["jpg", "jpeg", "gif", "png"]);
        assert_eq!(config.listen_socket(), "127.0.0.1:8000");
        assert_eq!(config.max_upload_size_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = StoreConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.data_root = "  ".into();
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.allowed_extensions.clear();
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.allowed_extensions.push(String::new());
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.max_upload_size_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_toml_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "data_root = \"/srv/images\"").unwrap();
        writeln!(file, "allowed_extensions = [\"png\", \"webp\"]").unwrap();
        writeln!(file, "port = 9090").unwrap();
        drop(file);

        let config = StoreConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.data_root, "/srv/images");
        assert_eq!(config.allowed_extensions, vec!["png", "webp"]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.max_upload_size_mb, 10);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(StoreConfig::load(Some(path.to_str().unwrap())).is_err());
    }
}
