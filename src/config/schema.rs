//! Configuration schema types for `citbuild.toml`
//!
//! Defines the structure and validation rules for a citbuild run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CitConfig {
    /// Paths and suite selection
    #[serde(default)]
    pub project: ProjectConfig,
    /// Toolchain invocation settings
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// Paths and suite selection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Output directory artifacts are packaged into
    #[serde(default = "default_out")]
    pub out: PathBuf,
    /// Directory containing the `cmd/` and `test_suites/` subtrees
    #[serde(default = "default_suite_root")]
    pub suite_root: PathBuf,
    /// Glob patterns selecting suites by directory name
    #[serde(default = "default_suites")]
    pub suites: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self { out: default_out(), suite_root: default_suite_root(), suites: default_suites() }
    }
}

fn default_out() -> PathBuf {
    PathBuf::from(".")
}

fn default_suite_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_suites() -> Vec<String> {
    vec!["*".to_string()]
}

/// Toolchain invocation section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Toolchain executable
    #[serde(default = "default_command")]
    pub command: String,
    /// Build tag gating integration tests out of ordinary unit-test runs
    #[serde(default = "default_build_tag")]
    pub build_tag: String,
    /// Whether builds may link against C libraries; kept off so every
    /// produced binary is statically self-contained
    #[serde(default)]
    pub cgo_enabled: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self { command: default_command(), build_tag: default_build_tag(), cgo_enabled: false }
    }
}

fn default_command() -> String {
    "go".to_string()
}

fn default_build_tag() -> String {
    "cit".to_string()
}

impl CitConfig {
    /// Validate the configuration, returning human-readable problems.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.toolchain.command.trim().is_empty() {
            errors.push("toolchain.command must not be empty".to_string());
        }
        if self.toolchain.build_tag.trim().is_empty() {
            errors.push("toolchain.build_tag must not be empty".to_string());
        }
        if self.project.suites.iter().any(|p| p.trim().is_empty()) {
            errors.push("project.suites must not contain empty patterns".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CitConfig::default();
        assert_eq!(config.project.out, PathBuf::from("."));
        assert_eq!(config.project.suites, vec!["*"]);
        assert_eq!(config.toolchain.command, "go");
        assert_eq!(config.toolchain.build_tag, "cit");
        assert!(!config.toolchain.cgo_enabled);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: CitConfig = toml::from_str(
            r#"
            [project]
            out = "artifacts"
            suites = ["disk", "cvm"]
            "#,
        )
        .unwrap();

        assert_eq!(config.project.out, PathBuf::from("artifacts"));
        assert_eq!(config.project.suites, vec!["disk", "cvm"]);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.toolchain.command, "go");
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = CitConfig::default();
        config.toolchain.build_tag = "".to_string();
        config.project.suites = vec!["".to_string()];

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
    }
}
