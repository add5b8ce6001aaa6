//! Subcommand implementations.

pub mod config;
pub mod convert;
pub mod extract;
pub mod summarize;

use std::path::{Path, PathBuf};

use tracing::debug;

use payslip_core::models::config::PayslipConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("payslip")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PayslipConfig> {
    if let Some(path) = config_path {
        return Ok(PayslipConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(PayslipConfig::from_file(&default_path)?)
    } else {
        Ok(PayslipConfig::default())
    }
}
