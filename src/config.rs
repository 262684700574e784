//! Service configuration.
//!
//! Loaded from an optional YAML file, then overridden from the environment:
//!
//! - `DIRECTOR_CONFIG` — path to a YAML config file
//! - `HOST` — bind address (default: 0.0.0.0)
//! - `PORT` — HTTP port (default: 8080)
//!
//! ```yaml
//! server:
//!   host: 127.0.0.1
//!   port: 9000
//! policy:
//!   uncertain_probability: 0.3
//! default_session: lobby
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::director::{Director, DirectorPolicy, SafetyEnforcer, DEFAULT_SESSION};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value was out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Director policy tuning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Anomaly probability emitted in the uncertain band.
    #[serde(default)]
    pub uncertain_probability: f64,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Session key used by the session-less `/analyze` endpoint.
    #[serde(default = "default_session")]
    pub default_session: String,
}

fn default_session() -> String { DEFAULT_SESSION.to_string() }

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            policy: PolicyConfig::default(),
            default_session: default_session(),
        }
    }
}

impl DirectorConfig {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Load from `DIRECTOR_CONFIG` (if set), then apply `HOST`/`PORT`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("DIRECTOR_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST`/`PORT` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT '{}' is not a valid port", port)))?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.policy.uncertain_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "policy.uncertain_probability must be within [0, 1], got {}",
                p
            )));
        }
        if self.default_session.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_session must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a director from this configuration.
    pub fn build_director(&self) -> Director {
        Director::new(
            DirectorPolicy::new(self.policy.uncertain_probability),
            SafetyEnforcer::default(),
        )
        .with_default_session(self.default_session.clone())
    }
}
