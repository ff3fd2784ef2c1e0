//! Service configuration.
//!
//! Values come from a TOML file whose sections may be partial or absent; missing
//! keys take the defaults below. A few environment variables override the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const CONFIG_PATH_VAR: &str = "SPLITPAY_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "splitpay.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Largest accepted request body
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,
    /// Wizard sessions held at once
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Contact rows accepted when a session is created
    #[serde(default = "default_max_contacts")]
    pub max_contacts: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size_kb: default_max_body_size_kb(),
            max_sessions: default_max_sessions(),
            max_contacts: default_max_contacts(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitPayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl SplitPayConfig {
    /// Loads `path`, or the file named by `SPLITPAY_CONFIG_PATH`, or `splitpay.toml`,
    /// then applies environment overrides and validates the result.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => std::env::var(CONFIG_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        let config = match fs::read_to_string(&path) {
            Ok(raw) => Self::from_toml_str(&raw)
                .with_context(|| format!("Failed to parse configuration file '{}'", path.display()))?,
            Err(_) => {
                warn!(
                    "Configuration file '{}' not found. Using default configuration.",
                    path.display()
                );
                Self::default()
            }
        };

        let config = config.apply_env_overrides();
        config.validate()?;
        info!(host = %config.server.host, port = config.server.port, "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("SPLITPAY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SPLITPAY_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid SPLITPAY_PORT"),
            }
        }
        if let Ok(max) = std::env::var("SPLITPAY_MAX_SESSIONS") {
            if let Ok(max) = max.parse::<usize>() {
                self.limits.max_sessions = max;
            }
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.limits.max_body_size_kb == 0 {
            bail!("limits.max_body_size_kb must be greater than zero");
        }
        if self.limits.max_sessions == 0 {
            bail!("limits.max_sessions must be greater than zero");
        }
        if self.limits.max_contacts == 0 {
            bail!("limits.max_contacts must be greater than zero");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_max_body_size_kb() -> usize {
    64
}
fn default_max_sessions() -> usize {
    10_000
}
fn default_max_contacts() -> usize {
    500
}
