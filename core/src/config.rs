//! Client configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Errors raised while loading a `ClientConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config ({context}): {detail}")]
    Load { context: &'static str, detail: String },
}

/// Settings for the composition root: where the endpoint lives, how long a
/// single call may take, and the name prefixed to every log entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_service_name() -> String {
    "HeroService".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            service_name: default_service_name(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Load {
            context: "parse",
            detail: e.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            context: "read",
            detail: format!("'{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&content).map_err(|ConfigError::Load { context, detail }| {
            ConfigError::Load {
                context,
                detail: format!("'{}': {detail}", path.display()),
            }
        })
    }
}
