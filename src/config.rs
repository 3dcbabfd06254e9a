// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the metrics engine

pub mod engine_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{env_config, service};

pub use engine_config::{
    EngineConfig, InsightThresholds, LoadModelConfig, TraitThresholds, WindowConfig,
};

/// Default location of the engine config inside the user's config directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join(service::SERVICE_NAME).join(service::CONFIG_FILE_NAME))
        .unwrap_or_else(|| service::CONFIG_FILE_NAME.into())
}

impl EngineConfig {
    /// Load engine configuration, falling back to built-in defaults.
    ///
    /// Lookup order: explicit `path`, `METRICS_CONFIG_PATH`, `metrics_config.toml`
    /// in the working directory, then the user config directory. An explicit
    /// path that does not exist is an error; the implicit locations are optional.
    pub fn load(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path.or_else(env_config::config_path) {
            info!(config.path = %config_path, "Loading metrics config");
            return Self::load_from_file(&config_path);
        }

        if Path::new(service::CONFIG_FILE_NAME).exists() {
            info!(config.path = %service::CONFIG_FILE_NAME, "Loading metrics config");
            return Self::load_from_file(service::CONFIG_FILE_NAME);
        }

        let user_path = default_config_path();
        if user_path.exists() {
            let user_path = user_path.to_string_lossy().to_string();
            info!(config.path = %user_path, "Loading metrics config");
            return Self::load_from_file(&user_path);
        }

        debug!("No metrics config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = path
            .unwrap_or_else(|| default_config_path().to_string_lossy().to_string());

        if let Some(parent) = Path::new(&config_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory for {config_path}"))?;
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize metrics config")?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write metrics config file: {config_path}"))?;

        Ok(())
    }
}
