//! Application configuration for ContactBook.
//!
//! User config lives at `~/.contactbook/contactbook.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ContactBookError, Result};
use crate::types::Platform;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "contactbook.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".contactbook";

// ---------------------------------------------------------------------------
// Config structs (matching contactbook.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Dialer intent settings.
    #[serde(default)]
    pub dialer: DialerConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Address-book snapshot file. A leading `~/` expands to the home directory.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Platform used to pick the call-URI scheme.
    #[serde(default)]
    pub platform: Platform,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            platform: Platform::default(),
        }
    }
}

fn default_snapshot_path() -> String {
    "~/.contactbook/contacts.json".into()
}

/// `[dialer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialerConfig {
    /// Base URL of the web messaging fallback; the digits are appended.
    #[serde(default = "default_web_fallback_base")]
    pub web_fallback_base: String,
}

impl Default for DialerConfig {
    fn default() -> Self {
        Self {
            web_fallback_base: default_web_fallback_base(),
        }
    }
}

fn default_web_fallback_base() -> String {
    "https://wa.me/".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.contactbook/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ContactBookError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.contactbook/contactbook.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ContactBookError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ContactBookError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ContactBookError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ContactBookError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ContactBookError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check values serde cannot: the fallback base must be an absolute http(s) URL.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let base = &config.dialer.web_fallback_base;
    let url = Url::parse(base).map_err(|e| {
        ContactBookError::config(format!("invalid dialer.web_fallback_base '{base}': {e}"))
    })?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ContactBookError::config(format!(
            "dialer.web_fallback_base must be an http(s) URL, got '{base}'"
        )));
    }
    Ok(())
}

/// Resolve a configured path, expanding a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir()
                .ok_or_else(|| ContactBookError::config("could not determine home directory"))?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

impl AppConfig {
    /// The snapshot file path with `~` expanded.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        expand_home(&self.defaults.snapshot_path)
    }
}
