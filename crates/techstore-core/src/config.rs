//! Configuration management for TechStore.
//!
//! Loads configuration from ${TECHSTORE_HOME}/config.toml with sensible
//! defaults. Auth service credentials can also come from the environment
//! (TECHSTORE_AUTH_URL / TECHSTORE_AUTH_KEY), which wins over the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Auth service connection settings.
///
/// Both fields are required for any auth operation. Missing values do not
/// prevent startup: the catalog works without them, and auth attempts fail
/// with an explicit configuration error instead of contacting the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the auth service (e.g. `https://project.supabase.co`).
    pub url: Option<String>,
    /// Public (anon) API key for the auth service.
    pub anon_key: Option<String>,
}

impl AuthConfig {
    /// Returns true when both the service URL and key are present and non-empty.
    pub fn is_configured(&self) -> bool {
        self.effective_url().is_some() && self.effective_anon_key().is_some()
    }

    /// Returns the service URL if set and non-empty.
    pub fn effective_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Returns the anon key if set and non-empty.
    pub fn effective_anon_key(&self) -> Option<&str> {
        self.anon_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Auth service settings.
    pub auth: AuthConfig,
}

impl Config {
    /// Loads configuration from the default config path, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies TECHSTORE_AUTH_URL / TECHSTORE_AUTH_KEY environment overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TECHSTORE_AUTH_URL")
            && !url.trim().is_empty()
        {
            self.auth.url = Some(url);
        }
        if let Ok(key) = std::env::var("TECHSTORE_AUTH_KEY")
            && !key.trim().is_empty()
        {
            self.auth.anon_key = Some(key);
        }
    }
}

pub mod paths {
    //! Path resolution for TechStore configuration and data directories.
    //!
    //! TECHSTORE_HOME resolution order:
    //! 1. TECHSTORE_HOME environment variable (if set)
    //! 2. ~/.techstore (default)

    use std::path::PathBuf;

    /// Returns the TechStore home directory.
    ///
    /// Checks TECHSTORE_HOME env var first, falls back to ~/.techstore
    pub fn techstore_home() -> PathBuf {
        if let Ok(home) = std::env::var("TECHSTORE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".techstore"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        techstore_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        techstore_home().join("session.json")
    }

    /// Returns the directory where log files are written.
    pub fn logs_dir() -> PathBuf {
        techstore_home().join("logs")
    }
}
