//! Configuration loading and discovery for `citbuild.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::CitConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse citbuild.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override suite root
    pub suite_root: Option<PathBuf>,
    /// Override suite selection patterns
    pub suites: Option<Vec<String>>,
}

/// Find citbuild.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find citbuild.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join("citbuild.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a citbuild.toml file.
///
/// If a path is provided, loads from that file. Otherwise uses
/// [`find_config`] to locate one; when none is found, returns defaults.
pub fn load_config(path: Option<&Path>) -> Result<CitConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path) -> Result<CitConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: CitConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok(config)
}

/// Create a default configuration when no citbuild.toml is found.
pub fn default_config() -> CitConfig {
    CitConfig::default()
}

/// Apply CLI overrides on top of a loaded configuration.
pub fn merge_cli_overrides(config: &mut CitConfig, overrides: &CliOverrides) {
    if let Some(out) = &overrides.out {
        config.project.out = out.clone();
    }
    if let Some(root) = &overrides.suite_root {
        config.project.suite_root = root.clone();
    }
    if let Some(suites) = &overrides.suites {
        config.project.suites = suites.clone();
    }
}
