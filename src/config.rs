//! Configuration loading.
//!
//! Sources, lowest precedence first: defaults, the JSON file at
//! `config/config.json` (or `$REFERRAL_CONFIG`), `REFERRAL_`-prefixed
//! environment variables nested with `__`, and `SECRET_KEY`.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file.
pub const CONFIG_FILE: &str = "config/config.json";

/// Environment variable that points at another configuration file.
pub const CONFIG_PATH_ENV: &str = "REFERRAL_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum request body in bytes.
    pub body_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Csv,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Flat file holding the referral table.
    pub path: PathBuf,
}

/// Recruiter credentials and token settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub secret_key: String,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            body_limit: 1024 * 1024,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Csv,
            path: PathBuf::from("data/referrals.csv"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "recruiter".to_string(),
            password: "password123".to_string(),
            secret_key: "dev-secret".to_string(),
            token_ttl_hours: 8,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the default file location (or `$REFERRAL_CONFIG`) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn read() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::read_from(&path)
    }

    /// Load with an explicit config file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn read_from(path: &Path) -> Result<Self> {
        let config: Config = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed("REFERRAL_").split("__").ignore(&["config"]))
            .merge(
                Env::raw()
                    .only(&["SECRET_KEY"])
                    .map(|_| "auth.secret_key".into()),
            )
    }

    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config_validation("server.port must not be 0"));
        }
        if self.auth.username.is_empty() {
            return Err(Error::config_validation("auth.username must not be empty"));
        }
        if self.auth.secret_key.is_empty() {
            return Err(Error::config_validation("auth.secret_key must not be empty"));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(Error::config_validation(
                "auth.token_ttl_hours must be positive",
            ));
        }
        if self.store.backend == StoreBackend::Csv && self.store.path.as_os_str().is_empty() {
            return Err(Error::config_validation("store.path must not be empty"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
