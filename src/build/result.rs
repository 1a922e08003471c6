//! Build result types.

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a single pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Step produced its artifact(s).
    Success,
    /// Step was tolerated as a no-op (dry run, missing Windows cross-build,
    /// or the ignored first wrapper build).
    Skipped,
    /// Step failed; carries the diagnostic text.
    Failed(String),
}

impl StepStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepStatus::Failed(_))
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Success => write!(f, "success"),
            StepStatus::Skipped => write!(f, "skipped"),
            StepStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of one pipeline step (a helper build, a suite compile for one
/// platform, or a manifest extraction).
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Step identifier, e.g. `wrapper:linux/amd64` or `disk:manifest`.
    pub step_id: String,
    pub status: StepStatus,
    /// Files this step placed in the output directory.
    pub outputs: Vec<PathBuf>,
    pub duration: Duration,
    pub warnings: Vec<String>,
}

impl StepResult {
    pub fn success(step_id: String, outputs: Vec<PathBuf>, duration: Duration) -> Self {
        Self { step_id, status: StepStatus::Success, outputs, duration, warnings: vec![] }
    }

    pub fn skipped(step_id: String) -> Self {
        Self {
            step_id,
            status: StepStatus::Skipped,
            outputs: vec![],
            duration: Duration::ZERO,
            warnings: vec![],
        }
    }

    pub fn failed(step_id: String, error: String, duration: Duration) -> Self {
        Self { step_id, status: StepStatus::Failed(error), outputs: vec![], duration, warnings: vec![] }
    }

    pub fn with_warning(mut self, warning: String) -> Self {
        self.warnings.push(warning);
        self
    }
}

/// Accumulated result of a whole pipeline run.
#[derive(Debug, Default)]
pub struct BuildResult {
    pub steps: Vec<StepResult>,
    pub total_duration: Duration,
}

impl BuildResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: StepResult) {
        self.steps.push(step);
    }

    pub fn success_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status == StepStatus::Success).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status == StepStatus::Skipped).count()
    }

    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_failure()).count()
    }

    /// Whether the run completed without a fatal failure. Skips do not count
    /// against success.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| s.status.is_failure())
    }

    pub fn all_warnings(&self) -> Vec<&String> {
        self.steps.iter().flat_map(|s| s.warnings.iter()).collect()
    }

    /// Every artifact placed in the output directory by this run.
    pub fn all_outputs(&self) -> Vec<&PathBuf> {
        self.steps.iter().flat_map(|s| s.outputs.iter()).collect()
    }

    /// One-line summary plus failure and warning details.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        let success = self.success_count();
        let skipped = self.skipped_count();
        let failed = self.failed_count();
        let total = self.steps.len();

        if failed > 0 {
            lines.push(format!(
                "Build failed: {} succeeded, {} skipped, {} failed ({} steps)",
                success, skipped, failed, total
            ));
            for step in self.failures() {
                lines.push(format!("  - {}: {}", step.step_id, step.status));
            }
        } else {
            lines.push(format!(
                "Build succeeded: {} built, {} skipped ({} steps) in {:?}",
                success, skipped, total, self.total_duration
            ));
        }

        let warnings = self.all_warnings();
        if !warnings.is_empty() {
            lines.push(format!("Warnings ({}):", warnings.len()));
            for warning in warnings {
                lines.push(format!("  - {}", warning));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_display() {
        assert_eq!(StepStatus::Success.to_string(), "success");
        assert_eq!(StepStatus::Skipped.to_string(), "skipped");
        assert_eq!(StepStatus::Failed("exit 2".to_string()).to_string(), "failed: exit 2");
    }

    #[test]
    fn test_build_result_counts() {
        let mut result = BuildResult::new();
        result.add_step(StepResult::success("a".to_string(), vec![], Duration::ZERO));
        result.add_step(StepResult::skipped("b".to_string()));
        result.add_step(StepResult::failed("c".to_string(), "boom".to_string(), Duration::ZERO));

        assert_eq!(result.success_count(), 1);
        assert_eq!(result.skipped_count(), 1);
        assert_eq!(result.failed_count(), 1);
        assert!(!result.is_success());
    }

    #[test]
    fn test_skips_do_not_fail_the_run() {
        let mut result = BuildResult::new();
        result.add_step(
            StepResult::skipped("disk:windows/386".to_string())
                .with_warning("no artifact emitted".to_string()),
        );

        assert!(result.is_success());
        assert_eq!(result.all_warnings().len(), 1);
    }

    #[test]
    fn test_summary_lists_failures() {
        let mut result = BuildResult::new();
        result.add_step(StepResult::failed(
            "disk:linux/arm64".to_string(),
            "undefined: Foo".to_string(),
            Duration::from_millis(10),
        ));

        let summary = result.summary();
        assert!(summary.contains("Build failed"));
        assert!(summary.contains("disk:linux/arm64"));
        assert!(summary.contains("undefined: Foo"));
    }

    #[test]
    fn test_all_outputs() {
        let mut result = BuildResult::new();
        result.add_step(StepResult::success(
            "wrapper:linux/amd64".to_string(),
            vec![PathBuf::from("wrapper.amd64")],
            Duration::ZERO,
        ));
        result.add_step(StepResult::success(
            "disk:manifest".to_string(),
            vec![PathBuf::from("disk_tests.txt")],
            Duration::ZERO,
        ));

        assert_eq!(result.all_outputs().len(), 2);
    }
}
