//! Configuration loading — TOML file with environment variable overrides.
//!
//! ```toml
//! database_url = "sqlite:spothub.db"
//! log_filter = "spothubd=info,tower_http=debug"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [auth]
//! jwt_secret = "change-me"
//! token_ttl_hours = 24
//! ```
//!
//! Every field has a default, so the file is optional. The token secret
//! defaults to empty and is only demanded by the commands that sign or
//! verify tokens.

use std::path::Path;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `SQLite` connection URL or file path.
    pub database_url: String,
    /// Filter directive (`RUST_LOG` syntax).
    pub log_filter: String,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Bearer token settings.
    pub auth: AuthConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Token signing configuration.
#[derive(Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HS256 secret.
    pub jwt_secret: String,
    /// Lifetime of tokens printed by `spothubd issue-token`.
    pub token_ttl_hours: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from `path` (if present), then apply `SPOTHUB_*`
    /// and `RUST_LOG` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, if
    /// an override is malformed, or if the result is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("SPOTHUB_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("SPOTHUB_PORT") {
            self.server.port = val.parse().map_err(|_| {
                ConfigError::Validation(format!("SPOTHUB_PORT is not a port number: {val}"))
            })?;
        }
        if let Some(val) = lookup("SPOTHUB_DATABASE_URL") {
            self.database_url = val;
        }
        if let Some(val) = lookup("SPOTHUB_JWT_SECRET") {
            self.auth.jwt_secret = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.log_filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::Validation(
                "token_ttl_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl AuthConfig {
    /// The signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when no secret is configured.
    pub fn secret(&self) -> Result<&[u8], ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Validation(
                "auth.jwt_secret (or SPOTHUB_JWT_SECRET) must be set".to_string(),
            ));
        }
        Ok(self.jwt_secret.as_bytes())
    }

    /// Lifetime of issued tokens.
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:spothub.db".to_string(),
            log_filter: "spothubd=info,spothub=info,tower_http=debug".to_string(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 24,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
