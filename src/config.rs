//! Connection configuration for the object-model store.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Settings the store client needs: where the store lives, the bearer
/// credential, and the object-model module the schema is provisioned into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_module")]
    pub module: String,
}

fn default_module() -> String {
    "process_automation".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_token: String::new(),
            module: default_module(),
        }
    }
}

impl Config {
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("provision-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".provision-cli")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location when no
    /// path is given. A missing file yields the defaults; overrides come from
    /// the command line afterwards.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, starting from defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    }

    /// Check that everything the client needs is present.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            anyhow::bail!("No store host configured; set `host` in the config file or pass --host");
        }
        if self.api_token.is_empty() {
            anyhow::bail!("No API token configured; set `api_token` in the config file or pass --token");
        }
        if self.module.is_empty() {
            anyhow::bail!("No object-model module configured; set `module` in the config file or pass --module");
        }
        Ok(())
    }
}
