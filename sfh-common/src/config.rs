//! Configuration file loading and layered setting resolution
//!
//! Every setting is resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 are collapsed by the caller's argument parser, which reads
//! the environment for any flag not given on the command line.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings that may appear in a service TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub identity_service_uri: Option<String>,
    pub monitoring_service_uri: Option<String>,
}

/// Load a TOML config file
///
/// An explicitly requested file must exist. Without an explicit path the
/// platform default location is tried, and a missing file there yields an
/// empty config.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using command line, environment and defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;

    debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Pick the first configured value across the layered tiers
pub fn layered<T>(cli_or_env: Option<T>, toml: Option<T>) -> Option<T> {
    cli_or_env.or(toml)
}

/// Get default configuration file path for the platform
///
/// `<config dir>/sfh/config.toml`, e.g. `~/.config/sfh/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sfh").join("config.toml"))
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/sfh (or /var/lib/sfh for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("sfh"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/sfh"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("sfh"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/sfh"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("sfh"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\sfh"))
    } else {
        PathBuf::from("./sfh_data")
    }
}

/// Default SQLite connection string for a service database file
///
/// Creates the data folder so SQLite can create the file on first start.
pub fn default_database_url(file_name: &str) -> Result<String> {
    let folder = default_data_folder();
    std::fs::create_dir_all(&folder)?;
    Ok(format!("sqlite://{}", folder.join(file_name).display()))
}
