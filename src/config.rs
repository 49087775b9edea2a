//! Layered runtime settings.
//!
//! Loading order, later layers winning:
//! 1. Compiled [`BoardSettings::default()`]
//! 2. An optional JSON settings file
//! 3. `TASKBOARD_`-prefixed environment variables, with `__` separating
//!    nested keys (`TASKBOARD_SERVER__PORT=8080`)

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested settings file does not exist.
    #[error("settings file not found: {0}")]
    MissingFile(PathBuf),
    /// A layer could not be read or did not match the settings shape.
    #[error("invalid settings: {0}")]
    Figment(#[from] Box<figment::Error>),
    /// The `PostgreSQL` backend was chosen without a database URL.
    #[error("storage.database_url is required for the postgres backend")]
    MissingDatabaseUrl,
    /// Host and port do not form a socket address.
    #[error("invalid listen address '{0}'")]
    InvalidListenAddress(String),
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// HTTP listener.
    pub server: ServerSettings,
    /// Persistence backend.
    pub storage: StorageSettings,
    /// Static bearer tokens.
    pub auth: AuthSettings,
    /// Log output.
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Accept cross-origin requests from any origin.
    pub permissive_cors: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            permissive_cors: false,
        }
    }
}

/// Which store backs the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local store; contents vanish on exit.
    #[default]
    Memory,
    /// `PostgreSQL` through a connection pool.
    Postgres,
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Selected backend.
    pub backend: StorageBackend,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_url: None,
            pool_size: 8,
        }
    }
}

/// Static token table mapping bearer tokens to owner UUIDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// `token -> owner uuid`.
    pub tokens: BTreeMap<String, String>,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, for example `info,taskboard=debug`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            json: false,
        }
    }
}

impl BoardSettings {
    /// Builds the layered provider without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let base = Figment::from(Serialized::defaults(Self::default()));
        let with_file = match file {
            Some(path) => base.merge(Json::file(path)),
            None => base,
        };
        with_file.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, a layer is
    /// malformed, or the storage section is inconsistent.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = file
            && !path.is_file()
        {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let settings: Self = Self::figment(file).extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when the `PostgreSQL`
    /// backend has no URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres {
            self.database_url()?;
        }
        Ok(())
    }

    /// Returns the configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.storage
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Returns the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidListenAddress`] when host and port do
    /// not parse as a socket address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse()
            .map_err(|_| ConfigError::InvalidListenAddress(raw))
    }
}
