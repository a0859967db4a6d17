use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::constants::DEFAULT_API_VERSION;

pub const ENV_API_VERSION: &str = "SFDC_API_VERSION";
pub const ENV_DOMAIN: &str = "SFDC_DOMAIN";
pub const ENV_METADATA_WSDL: &str = "SFDC_METADATA_WSDL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Login domain: `login` for production, `test` for sandboxes
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Metadata WSDL; its target namespace is used for SOAP calls
    #[serde(default)]
    pub metadata_wsdl: Option<PathBuf>,
    #[serde(default)]
    pub transport: TransportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_domain() -> String {
    "login".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("sfdc-cli/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            domain: default_domain(),
            metadata_wsdl: None,
            transport: TransportSettings::default(),
        }
    }
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("sfdc-cli")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".sfdc-cli")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load the default config file (or defaults) and apply env overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config for API version {}", config.api_version);
        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_path = path.as_ref();
        debug!("Saving config to: {:?}", config_path);

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
                info!("Created config directory: {:?}", parent);
            }
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(version) = lookup(ENV_API_VERSION).filter(|v| !v.is_empty()) {
            debug!("API version overridden from environment: {}", version);
            self.api_version = version;
        }
        if let Some(domain) = lookup(ENV_DOMAIN).filter(|v| !v.is_empty()) {
            self.domain = domain;
        }
        if let Some(wsdl) = lookup(ENV_METADATA_WSDL).filter(|v| !v.is_empty()) {
            self.metadata_wsdl = Some(PathBuf::from(wsdl));
        }
    }
}
