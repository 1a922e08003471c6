//! Per-suite build sequence.
//!
//! For one suite the builder drives the toolchain across the platform
//! matrix in fixed order: host-native (with manifest extraction), arm64,
//! windows/amd64, windows/386. The sequence halts at the first failing step.
//!
//! The native and arm64 binaries must always be produced; the manifest
//! depends on the native one. The Windows cross-builds may legitimately emit
//! nothing for suites with no Windows-specific tests, which is tolerated as
//! a no-op rather than a failure.

use crate::build::discovery::Suite;
use crate::build::platform::{self, Platform};
use crate::build::result::{StepResult, StepStatus};
use crate::build::toolchain::Toolchain;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Builds every artifact for a single suite.
pub struct SuiteBuilder<'a> {
    toolchain: &'a dyn Toolchain,
    build_tag: &'a str,
    verbose: bool,
}

impl<'a> SuiteBuilder<'a> {
    pub fn new(toolchain: &'a dyn Toolchain, build_tag: &'a str) -> Self {
        Self { toolchain, build_tag, verbose: false }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the full platform sequence for `suite`, writing artifacts into
    /// `out_dir`. Returns the step results in execution order; if the last
    /// one is a failure the sequence was aborted there.
    ///
    /// `out_dir` must be an absolute path: test compiles run with the suite
    /// directory as their working directory, and a relative output path
    /// would resolve against that instead.
    pub fn build(&self, suite: &Suite, out_dir: &Path) -> Vec<StepResult> {
        let mut steps = Vec::new();

        // Host-native binary, compiled to a working name and relocated only
        // after the manifest is extracted from it.
        let native_id = step_id(&suite.name, Platform::LINUX_AMD64);
        self.log(&native_id);
        let work = work_path(out_dir, &suite.name);
        let start = Instant::now();
        if let Err(e) = self.toolchain.compile_test_binary(
            &suite.source_path,
            Platform::LINUX_AMD64,
            self.build_tag,
            &work,
        ) {
            steps.push(StepResult::failed(native_id, e.to_string(), start.elapsed()));
            return steps;
        }
        if !work.exists() {
            steps.push(StepResult::failed(
                native_id,
                "toolchain reported success but emitted no test binary".to_string(),
                start.elapsed(),
            ));
            return steps;
        }
        let compile_duration = start.elapsed();

        // Manifest: a suite with no discoverable test list cannot be
        // scheduled later, so any failure here is fatal.
        let manifest_id = format!("{}:manifest", suite.name);
        self.log(&manifest_id);
        let manifest_start = Instant::now();
        let listing = match self.toolchain.list_tests(&work) {
            Ok(listing) => listing,
            Err(e) => {
                steps.push(StepResult::failed(manifest_id, e.to_string(), manifest_start.elapsed()));
                return steps;
            }
        };
        let manifest_path = out_dir.join(platform::suite_manifest_name(&suite.name));
        if let Err(e) = fs::write(&manifest_path, &listing) {
            steps.push(StepResult::failed(
                manifest_id,
                format!("cannot write {}: {}", manifest_path.display(), e),
                manifest_start.elapsed(),
            ));
            return steps;
        }

        // Relocate the native binary to its final name.
        let native_path = out_dir.join(platform::suite_binary_name(&suite.name, Platform::LINUX_AMD64));
        if let Err(e) = fs::rename(&work, &native_path) {
            steps.push(StepResult::failed(
                native_id,
                format!("cannot place {}: {}", native_path.display(), e),
                compile_duration,
            ));
            return steps;
        }
        steps.push(StepResult::success(native_id, vec![native_path], compile_duration));
        steps.push(StepResult::success(manifest_id, vec![manifest_path], manifest_start.elapsed()));

        // Remaining matrix entries; the manifest is platform-independent and
        // is not regenerated.
        for target in [Platform::LINUX_ARM64, Platform::WINDOWS_AMD64, Platform::WINDOWS_386] {
            let step = self.cross_compile(suite, target, out_dir);
            let failed = step.status.is_failure();
            steps.push(step);
            if failed {
                return steps;
            }
        }

        steps
    }

    /// Compile `suite` for one non-native target and relocate the artifact.
    fn cross_compile(&self, suite: &Suite, target: Platform, out_dir: &Path) -> StepResult {
        let id = step_id(&suite.name, target);
        self.log(&id);
        let work = work_path(out_dir, &suite.name);
        let start = Instant::now();

        if let Err(e) =
            self.toolchain.compile_test_binary(&suite.source_path, target, self.build_tag, &work)
        {
            return StepResult::failed(id, e.to_string(), start.elapsed());
        }

        // The toolchain appends `.exe` to Windows outputs regardless of the
        // requested name.
        let emitted = if target.is_windows() {
            let mut os = work.clone().into_os_string();
            os.push(".exe");
            PathBuf::from(os)
        } else {
            work
        };

        if !emitted.exists() {
            if target.is_windows() {
                // Cross-compiling a suite with no Windows tests can emit
                // nothing; tolerated as a no-op.
                return StepResult::skipped(id.clone())
                    .with_warning(format!("{}: no test binary emitted, artifact skipped", id));
            }
            return StepResult::failed(
                id,
                "toolchain reported success but emitted no test binary".to_string(),
                start.elapsed(),
            );
        }

        let final_path = out_dir.join(platform::suite_binary_name(&suite.name, target));
        if let Err(e) = fs::rename(&emitted, &final_path) {
            return StepResult::failed(
                id,
                format!("cannot place {}: {}", final_path.display(), e),
                start.elapsed(),
            );
        }

        StepResult::success(id, vec![final_path], start.elapsed())
    }

    fn log(&self, id: &str) {
        if self.verbose {
            println!("Building: {} ...", id);
        }
    }
}

/// Working filename a suite binary is compiled to before relocation.
fn work_path(out_dir: &Path, suite: &str) -> PathBuf {
    out_dir.join(format!("{}.test", suite))
}

fn step_id(suite: &str, platform: Platform) -> String {
    format!("{}:{}", suite, platform)
}

/// Whether a finished suite sequence ended in failure.
pub fn sequence_failed(steps: &[StepResult]) -> bool {
    steps.last().map(|s| matches!(s.status, StepStatus::Failed(_))).unwrap_or(false)
}
