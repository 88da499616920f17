//! `load_config` module: Loads the YAML client configuration and applies environment overrides.
//!
//! # Responsibilities
//! - Parse the user-supplied YAML file into [`ClientConfig`]; every key is optional
//! - Apply `SYMBOL_EXTRACTOR_HOST` / `SYMBOL_EXTRACTOR_PORT` from the environment (or `.env`)
//! - Report clear diagnostics: any failure names the file or variable involved
//!
//! Accepted YAML:
//!
//! ```yaml
//! server:
//!   host: http://127.0.0.1
//!   port: 8001
//!   check_status: false
//!   timeout_secs: 30
//! ```
//!
//! # Errors
//! All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use symbol_extractor_core::config::ClientConfig;
use tracing::{error, info};

pub const HOST_ENV: &str = "SYMBOL_EXTRACTOR_HOST";
pub const PORT_ENV: &str = "SYMBOL_EXTRACTOR_PORT";

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    server: ClientConfig,
}

/// Loads a YAML config file and applies environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let mut config = raw.server;
    apply_env_overrides(&mut config)?;
    config.trace_loaded();
    Ok(config)
}

/// Config file if given, defaults otherwise; environment overrides either way.
pub fn resolve_config(path: Option<&Path>) -> Result<ClientConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = ClientConfig::default();
            apply_env_overrides(&mut config)?;
            config.trace_loaded();
            Ok(config)
        }
    }
}

pub fn apply_env_overrides(config: &mut ClientConfig) -> Result<()> {
    if let Ok(host) = std::env::var(HOST_ENV) {
        info!(host = %host, "{HOST_ENV} found in env");
        config.host = host;
    }
    if let Ok(raw) = std::env::var(PORT_ENV) {
        config.port = raw.parse::<u16>().with_context(|| {
            error!(var = %raw, "{PORT_ENV} must be a valid port number");
            format!("{PORT_ENV} must be a valid port number, got {raw:?}")
        })?;
        info!(port = config.port, "{PORT_ENV} found in env");
    }
    Ok(())
}
