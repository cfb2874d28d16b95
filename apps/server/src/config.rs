//! Server configuration

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to enable CORS
    #[serde(default)]
    pub enable_cors: bool,

    /// Allowed CORS origins (any origin if empty)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            log_level: default_log_level(),
            enable_cors: false,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        config.apply_env();

        if let Some(config_path) = Self::find_config_file() {
            let file_config = Self::from_file(&config_path)?;
            tracing::debug!(path = %config_path.display(), "Loaded config file");
            config.merge(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Override fields from `USER_REGISTRY_*` environment variables
    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("USER_REGISTRY_BIND_ADDRESS") {
            self.bind_address = addr;
        }

        if let Ok(level) = std::env::var("USER_REGISTRY_LOG_LEVEL") {
            self.log_level = level.to_lowercase();
        }

        if let Ok(val) = std::env::var("USER_REGISTRY_ENABLE_CORS") {
            self.enable_cors = val.parse().unwrap_or(false);
        }

        if let Ok(origins) = std::env::var("USER_REGISTRY_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Fill fields still at their defaults from a file config. Environment
    /// values take precedence over the file.
    fn merge(&mut self, file_config: ServerConfig) {
        if self.bind_address == default_bind_address() {
            self.bind_address = file_config.bind_address;
        }
        if self.log_level == default_log_level() {
            self.log_level = file_config.log_level;
        }
        if !self.enable_cors {
            self.enable_cors = file_config.enable_cors;
        }
        if self.cors_origins.is_empty() {
            self.cors_origins = file_config.cors_origins;
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut locations = vec![PathBuf::from("user-registry.toml")];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("user-registry").join("server.toml"));
        }

        locations.into_iter().find(|p| p.exists())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }

        if !self.enable_cors && !self.cors_origins.is_empty() {
            tracing::warn!("CORS origins configured but CORS is disabled");
        }

        Ok(())
    }

    /// Parsed bind address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        for key in [
            "USER_REGISTRY_BIND_ADDRESS",
            "USER_REGISTRY_LOG_LEVEL",
            "USER_REGISTRY_ENABLE_CORS",
            "USER_REGISTRY_CORS_ORIGINS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert!(!config.enable_cors);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("USER_REGISTRY_BIND_ADDRESS", "127.0.0.1:9000");
        std::env::set_var("USER_REGISTRY_LOG_LEVEL", "DEBUG");
        std::env::set_var("USER_REGISTRY_ENABLE_CORS", "true");
        std::env::set_var("USER_REGISTRY_CORS_ORIGINS", "http://a.test, http://b.test,");

        let mut config = ServerConfig::default();
        config.apply_env();
        clear_env();

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.log_level, "debug");
        assert!(config.enable_cors);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    #[serial]
    fn test_env_takes_precedence_over_file() {
        clear_env();
        std::env::set_var("USER_REGISTRY_BIND_ADDRESS", "127.0.0.1:9000");

        let mut config = ServerConfig::default();
        config.apply_env();
        clear_env();

        let file_config: ServerConfig = toml::from_str(
            r#"
            bind_address = "0.0.0.0:7000"
            log_level = "warn"
            "#,
        )
        .unwrap();
        config.merge(file_config);

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ServerConfig = toml::from_str("enable_cors = true").unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ServerConfig {
            bind_address: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBindAddress(_))
        ));

        let config = ServerConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
