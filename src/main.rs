//! Citbuild - command-line build-matrix orchestrator for the image validation test harness

use std::process::ExitCode;

use citbuild::cli;

fn main() -> ExitCode {
    cli::run()
}
