//! Configuration management for Doorway.
//!
//! Loads configuration from ${DOORWAY_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::locale::Locale;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "DOORWAY_API_URL";

fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Doorway configuration and data files.
    //!
    //! DOORWAY_HOME resolution order:
    //! 1. DOORWAY_HOME environment variable (if set)
    //! 2. ~/.config/doorway (default)

    use std::path::PathBuf;

    /// Returns the Doorway home directory.
    pub fn doorway_home() -> PathBuf {
        if let Ok(home) = std::env::var("DOORWAY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("doorway")
    }

    pub fn config_path() -> PathBuf {
        doorway_home().join("config.toml")
    }

    pub fn session_path() -> PathBuf {
        doorway_home().join("session.json")
    }

    pub fn logs_dir() -> PathBuf {
        doorway_home().join("logs")
    }
}

/// Authentication server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub login_path: String,
    /// Zero disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            login_path: "/api/auth/login".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Full URL of the login endpoint.
    ///
    /// `login_path` is appended to `base_url`, so a path prefix on the base
    /// (`https://host/v1`) is kept.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not an absolute URL or the joined
    /// path is not valid.
    pub fn login_url(&self) -> Result<Url> {
        let mut base = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid api.base_url '{}'", self.base_url))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(self.login_path.trim_start_matches('/'))
            .with_context(|| format!("Invalid api.login_path '{}'", self.login_path))
    }

    /// Request timeout. Returns `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub landing_path: String,
    pub login_path: String,
    pub locale: Locale,
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            landing_path: "/dashboard".to_string(),
            login_path: "/login".to_string(),
            locale: Locale::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path, then applies
    /// environment overrides.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read, parsed, or
    /// validated.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            config.api.base_url = url.trim().to_string();
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        for (key, value) in [
            ("landing_path", &self.landing_path),
            ("login_path", &self.login_path),
        ] {
            if !value.starts_with('/') {
                anyhow::bail!("{key} must start with '/', got '{value}'");
            }
        }
        if self.landing_path == self.login_path {
            anyhow::bail!("landing_path and login_path must differ");
        }
        Ok(())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
