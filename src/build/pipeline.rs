//! Pipeline orchestration.
//!
//! Top-level control for a run: builds the fixed helper binaries, then runs
//! the suite builder over the selected suites, strictly sequentially. First
//! fatal failure stops the run; fail-fast is expressed as values returned up
//! the call chain so the CLI layer decides the process exit code, and partial
//! failure behavior stays unit-testable.

use crate::build::discovery::{self, DiscoveryError, Suite};
use crate::build::platform::{HelperBinary, Platform, MANAGER, WRAPPER};
use crate::build::result::{BuildResult, StepResult};
use crate::build::suite::{sequence_failed, SuiteBuilder};
use crate::build::toolchain::Toolchain;
use crate::config::CitConfig;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// Infrastructure error that prevents the pipeline from running at all.
///
/// Toolchain failures are not represented here; they become failed steps on
/// the [`BuildResult`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Drives one complete run of the build matrix.
pub struct BuildPipeline<'a> {
    toolchain: &'a dyn Toolchain,
    config: &'a CitConfig,
    verbose: bool,
    dry_run: bool,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(toolchain: &'a dyn Toolchain, config: &'a CitConfig) -> Self {
        Self { toolchain, config, verbose: false, dry_run: false }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Print the plan instead of invoking the toolchain.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the whole pipeline: helpers first, then each selected suite in
    /// lexicographic order.
    ///
    /// Returns `Ok` with a result that may contain a failed step (the run
    /// aborted there; earlier artifacts stay on disk) or `Err` for
    /// infrastructure problems such as an unreadable suite root.
    pub fn run(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let mut result = BuildResult::new();

        let out_dir = self.config.project.out.clone();
        let suite_root = self.config.project.suite_root.clone();
        let suites = discovery::discover_suites(&suite_root, &self.config.project.suites)?;

        if self.verbose || self.dry_run {
            self.print_plan(&suites);
        }

        if self.dry_run {
            for step in self.planned_step_ids(&suites) {
                result.add_step(StepResult::skipped(step));
            }
            result.total_duration = start.elapsed();
            return Ok(result);
        }

        std::fs::create_dir_all(&out_dir)?;
        // The test-compile step runs with the suite directory as its working
        // directory, so output paths handed to the toolchain must be
        // absolute or they land inside the suite tree.
        let out_dir = std::fs::canonicalize(&out_dir)?;

        if !self.build_helpers(&suite_root, &out_dir, &mut result) {
            result.total_duration = start.elapsed();
            return Ok(result);
        }

        let builder =
            SuiteBuilder::new(self.toolchain, &self.config.toolchain.build_tag).with_verbose(self.verbose);
        for suite in &suites {
            let steps = builder.build(suite, &out_dir);
            let failed = sequence_failed(&steps);
            for step in steps {
                result.add_step(step);
            }
            if failed {
                break;
            }
        }

        result.total_duration = start.elapsed();
        Ok(result)
    }

    /// Build `wrapper` across the matrix and `manager` for the host target.
    ///
    /// Policy preserved from the original harness: failure of the very first
    /// wrapper build (linux/amd64) is reported as a warning and ignored;
    /// failure of any later helper build aborts the run. Returns whether the
    /// pipeline may continue.
    fn build_helpers(&self, suite_root: &Path, out_dir: &Path, result: &mut BuildResult) -> bool {
        let mut first = true;
        for helper in [WRAPPER, MANAGER] {
            for &target in helper.targets {
                let step = self.build_helper(&helper, target, suite_root, out_dir);
                if step.status.is_failure() {
                    if first {
                        let warning = format!(
                            "{}: build failed, continuing without it: {}",
                            step.step_id, step.status
                        );
                        eprintln!("Warning: {}", warning);
                        result.add_step(StepResult::skipped(step.step_id).with_warning(warning));
                    } else {
                        result.add_step(step);
                        return false;
                    }
                } else {
                    result.add_step(step);
                }
                first = false;
            }
        }
        true
    }

    fn build_helper(
        &self,
        helper: &HelperBinary,
        target: Platform,
        suite_root: &Path,
        out_dir: &Path,
    ) -> StepResult {
        let id = format!("{}:{}", helper.name, target);
        if self.verbose {
            println!("Building: {} ...", id);
        }
        let entrypoint = suite_root.join(helper.entrypoint);
        let output = out_dir.join(helper.artifact_name(target));
        let start = Instant::now();
        match self.toolchain.build_binary(&entrypoint, target, &output) {
            Ok(()) => StepResult::success(id, vec![output], start.elapsed()),
            Err(e) => StepResult::failed(id, e.to_string(), start.elapsed()),
        }
    }

    fn planned_step_ids(&self, suites: &[Suite]) -> Vec<String> {
        let mut ids = Vec::new();
        for helper in [WRAPPER, MANAGER] {
            for &target in helper.targets {
                ids.push(format!("{}:{}", helper.name, target));
            }
        }
        for suite in suites {
            for target in Platform::MATRIX {
                ids.push(format!("{}:{}", suite.name, target));
                if target.is_host_native() {
                    ids.push(format!("{}:manifest", suite.name));
                }
            }
        }
        ids
    }

    fn print_plan(&self, suites: &[Suite]) {
        println!("Build plan: {} helper targets, {} suites", WRAPPER.targets.len() + MANAGER.targets.len(), suites.len());
        for id in self.planned_step_ids(suites) {
            println!("  - {}", id);
        }
    }
}
