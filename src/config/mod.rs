//! Configuration management
//!
//! Configuration is loaded from `config.yml` and may be overridden by
//! `INKPOST_*` environment variables. Missing values fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Template configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database driver (sqlite or mysql)
    #[serde(default)]
    pub driver: DatabaseDriver,
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/inkpost.db".to_string()
}

/// Database driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    /// SQLite (default)
    #[default]
    Sqlite,
    /// MySQL
    Mysql,
}

/// Template configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Directory whose `.html` files override the built-in templates by name
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing or empty file yields the default configuration. Invalid YAML
    /// is reported with its location.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Recognised variables:
    /// - INKPOST_SERVER_HOST
    /// - INKPOST_SERVER_PORT
    /// - INKPOST_DATABASE_DRIVER
    /// - INKPOST_DATABASE_URL
    /// - INKPOST_THEME_PATH
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("INKPOST_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("INKPOST_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }

        if let Ok(driver) = std::env::var("INKPOST_DATABASE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "sqlite" => self.database.driver = DatabaseDriver::Sqlite,
                "mysql" => self.database.driver = DatabaseDriver::Mysql,
                _ => {} // Ignore invalid values
            }
        }
        if let Ok(url) = std::env::var("INKPOST_DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(path) = std::env::var("INKPOST_THEME_PATH") {
            self.theme.path = Some(PathBuf::from(path));
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared by every test that touches process environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ENV_KEYS: &[&str] = &[
    "INKPOST_SERVER_HOST",
    "INKPOST_SERVER_PORT",
    "INKPOST_DATABASE_DRIVER",
    "INKPOST_DATABASE_URL",
    "INKPOST_THEME_PATH",
];

#[cfg(test)]
fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn config_strategy() -> impl Strategy<Value = Config> {
        (
            "[a-z0-9.]{1,20}",
            1024u16..65535,
            prop_oneof![Just(DatabaseDriver::Sqlite), Just(DatabaseDriver::Mysql)],
            "[a-z/]{1,30}\\.db",
            proptest::option::of("[a-z]{1,12}"),
        )
            .prop_map(|(host, port, driver, url, path)| Config {
                server: ServerConfig { host, port },
                database: DatabaseConfig { driver, url },
                theme: ThemeConfig {
                    path: path.map(PathBuf::from),
                },
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn config_survives_yaml_roundtrip(config in config_strategy()) {
            let yaml = serde_yaml::to_string(&config).unwrap();
            let mut file = NamedTempFile::new().unwrap();
            write!(file, "{}", yaml).unwrap();

            let loaded = Config::load(file.path()).unwrap();

            prop_assert_eq!(loaded.server.host, config.server.host);
            prop_assert_eq!(loaded.server.port, config.server.port);
            prop_assert_eq!(loaded.database.driver, config.database.driver);
            prop_assert_eq!(loaded.database.url, config.database.url);
            prop_assert_eq!(loaded.theme.path, config.theme.path);
        }

        #[test]
        fn env_port_takes_precedence_over_file(file_port in 1024u16..30000, env_port in 30000u16..65535) {
            let _guard = lock_env();
            clear_env();

            let mut file = NamedTempFile::new().unwrap();
            write!(file, "server:\n  port: {}\n", file_port).unwrap();
            std::env::set_var("INKPOST_SERVER_PORT", env_port.to_string());

            let config = Config::load_with_env(file.path()).unwrap();
            clear_env();

            prop_assert_eq!(config.server.port, env_port);
        }
    }
}
