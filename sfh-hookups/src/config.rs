//! Service configuration
//!
//! Each setting comes from, in priority order: command-line flag, environment
//! variable, TOML config file, compiled default.

use clap::Parser;
use sfh_common::config::{default_database_url, layered, load_toml_config, TomlConfig};
use sfh_common::{Error, Result};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MONITORING_HOST: &str = "monitoring";
pub const DEFAULT_MONITORING_PORT: u16 = 3003;
const DATABASE_FILE: &str = "hookups.db";

/// Command line, with environment variable fallbacks
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "sfh-hookups", version, about = "Smart furniture hookup service")]
pub struct Args {
    /// TOML config file (default: <config dir>/sfh/config.toml when present)
    #[arg(long, env = "SFH_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// SQLite connection string, e.g. sqlite:///var/lib/sfh/hookups.db
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base URI of the identity service used to verify access tokens
    #[arg(long, env = "USER_SERVICE_URI")]
    pub identity_service_uri: Option<String>,

    /// Base URI of the monitoring service
    #[arg(long, env = "MONITORING_SERVICE_URI")]
    pub monitoring_service_uri: Option<String>,

    /// Monitoring host, used only when no monitoring URI is configured
    #[arg(long, env = "MONITORING_SERVICE_HOST")]
    pub monitoring_service_host: Option<String>,

    /// Monitoring port, used only when no monitoring URI is configured
    #[arg(long, env = "MONITORING_SERVICE_PORT")]
    pub monitoring_service_port: Option<u16>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub identity_service_uri: String,
    pub monitoring_service_uri: String,
}

impl ServiceConfig {
    /// Read the TOML tier and resolve every setting
    pub fn load(args: Args) -> Result<Self> {
        let toml = load_toml_config(args.config.as_deref())?;
        Self::resolve(args, toml)
    }

    pub fn resolve(args: Args, toml: TomlConfig) -> Result<Self> {
        let identity_service_uri = layered(args.identity_service_uri, toml.identity_service_uri)
            .ok_or_else(|| {
                Error::Config(
                    "Identity service URI not configured. Set --identity-service-uri, \
                     USER_SERVICE_URI, or identity_service_uri in the config file"
                        .to_string(),
                )
            })?;

        let monitoring_service_uri =
            match layered(args.monitoring_service_uri, toml.monitoring_service_uri) {
                Some(uri) => uri,
                None => format!(
                    "http://{}:{}",
                    args.monitoring_service_host
                        .as_deref()
                        .unwrap_or(DEFAULT_MONITORING_HOST),
                    args.monitoring_service_port.unwrap_or(DEFAULT_MONITORING_PORT)
                ),
            };

        let database_url = match layered(args.database_url, toml.database_url) {
            Some(url) => url,
            None => default_database_url(DATABASE_FILE)?,
        };

        Ok(Self {
            host: layered(args.host, toml.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: layered(args.port, toml.port).unwrap_or(DEFAULT_PORT),
            database_url,
            identity_service_uri,
            monitoring_service_uri,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
