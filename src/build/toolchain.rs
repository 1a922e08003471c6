//! Compiler invocation layer.
//!
//! Wraps the Go toolchain's `build` and `test -c` operations behind the
//! [`Toolchain`] trait. The production implementation drives one
//! `std::process::Command` per operation; it reports success or failure and
//! never aborts the process itself. Fail-fast policy belongs to the caller.

use crate::build::platform::Platform;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Error from a single toolchain invocation.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// The toolchain (or a compiled test binary) could not be started.
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// Non-zero exit. The diagnostic text is passed through unchanged.
    #[error("{command} failed:\n{diagnostics}")]
    Failed { command: String, diagnostics: String },
}

/// Toolchain operations the pipeline depends on.
///
/// Tests substitute a scripted implementation so that fail-fast and
/// partial-failure behavior are testable without forking real compilers.
pub trait Toolchain {
    /// Compile the binary at `entrypoint` (relative to the invocation
    /// directory) for `platform`, writing the executable to `output`.
    fn build_binary(
        &self,
        entrypoint: &Path,
        platform: Platform,
        output: &Path,
    ) -> Result<(), ToolchainError>;

    /// Compile the tests under `suite_dir` into an executable test binary
    /// scoped to that directory, gated on `build_tag`.
    ///
    /// For Windows targets the toolchain appends `.exe` to the requested
    /// output name. Success with no emitted file is possible when
    /// cross-compiling a suite with no matching tests; callers must check
    /// for the artifact themselves.
    fn compile_test_binary(
        &self,
        suite_dir: &Path,
        platform: Platform,
        build_tag: &str,
        output: &Path,
    ) -> Result<(), ToolchainError>;

    /// Run a compiled test binary in list-only mode (no tests execute) and
    /// return its output verbatim: one discoverable test name per line.
    fn list_tests(&self, binary: &Path) -> Result<String, ToolchainError>;
}

/// Settings threaded into every toolchain invocation.
///
/// Static linking is carried here rather than mutated into the process
/// environment, so concurrent invocations with different settings stay
/// possible.
#[derive(Debug, Clone)]
pub struct ToolchainSettings {
    /// Toolchain executable, normally `go`.
    pub command: String,
    /// When false, `CGO_ENABLED=0` is set for every build and the produced
    /// binaries are statically self-contained.
    pub cgo_enabled: bool,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self { command: "go".to_string(), cgo_enabled: false }
    }
}

/// The real Go toolchain.
pub struct GoToolchain {
    settings: ToolchainSettings,
}

impl GoToolchain {
    pub fn new(settings: ToolchainSettings) -> Self {
        Self { settings }
    }

    /// Base command with the cross-compilation environment for `platform`.
    fn command_for(&self, platform: Platform) -> Command {
        let mut cmd = Command::new(&self.settings.command);
        cmd.env("GOOS", platform.os.goos());
        cmd.env("GOARCH", platform.arch.goarch());
        cmd.env("CGO_ENABLED", if self.settings.cgo_enabled { "1" } else { "0" });
        cmd
    }

    fn run(mut cmd: Command, what: String) -> Result<std::process::Output, ToolchainError> {
        let output = cmd
            .output()
            .map_err(|source| ToolchainError::Spawn { command: what.clone(), source })?;
        if output.status.success() {
            Ok(output)
        } else {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
            if diagnostics.trim().is_empty() {
                diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
            }
            Err(ToolchainError::Failed { command: what, diagnostics })
        }
    }
}

impl Toolchain for GoToolchain {
    fn build_binary(
        &self,
        entrypoint: &Path,
        platform: Platform,
        output: &Path,
    ) -> Result<(), ToolchainError> {
        let mut cmd = self.command_for(platform);
        cmd.arg("build").arg("-o").arg(output).arg(entrypoint);
        let what = format!("{} build {} ({})", self.settings.command, entrypoint.display(), platform);
        Self::run(cmd, what).map(|_| ())
    }

    fn compile_test_binary(
        &self,
        suite_dir: &Path,
        platform: Platform,
        build_tag: &str,
        output: &Path,
    ) -> Result<(), ToolchainError> {
        let mut cmd = self.command_for(platform);
        cmd.current_dir(suite_dir);
        cmd.arg("test").arg("-c").arg("-tags").arg(build_tag).arg("-o").arg(output);
        let what =
            format!("{} test -c {} ({})", self.settings.command, suite_dir.display(), platform);
        Self::run(cmd, what).map(|_| ())
    }

    fn list_tests(&self, binary: &Path) -> Result<String, ToolchainError> {
        let mut cmd = Command::new(binary);
        cmd.arg("-test.list").arg(".*");
        let what = format!("{} -test.list", binary.display());
        let output = Self::run(cmd, what)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_disables_cgo() {
        let settings = ToolchainSettings::default();
        assert_eq!(settings.command, "go");
        assert!(!settings.cgo_enabled);
    }

    #[test]
    fn test_spawn_error_for_missing_toolchain() {
        let toolchain = GoToolchain::new(ToolchainSettings {
            command: "/nonexistent/toolchain".to_string(),
            cgo_enabled: false,
        });

        let err = toolchain
            .build_binary(Path::new("cmd/wrapper/main"), Platform::LINUX_AMD64, Path::new("/tmp/out"))
            .unwrap_err();
        assert!(matches!(err, ToolchainError::Spawn { .. }));
    }

    #[test]
    fn test_failed_error_passes_diagnostics_through() {
        let err = ToolchainError::Failed {
            command: "go build".to_string(),
            diagnostics: "undefined: Foo".to_string(),
        };
        assert!(err.to_string().contains("undefined: Foo"));
    }
}
