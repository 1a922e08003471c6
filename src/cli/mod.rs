//! Command-line interface implementation
//!
//! Parses the flags, resolves configuration, and hands the run to the build
//! pipeline. The pipeline reports failures as values; this layer converts
//! them into the process exit code.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::build::{discovery, BuildPipeline, GoToolchain, ToolchainSettings};
use crate::config::{load_config, merge_cli_overrides, CliOverrides};

/// Exit codes: success, or first fatal failure
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// Citbuild - build the image validation test harness across the platform matrix
#[derive(Parser)]
#[command(name = "citbuild")]
#[command(about = "Build helper binaries and test suite binaries for every target platform")]
#[command(version)]
pub struct Cli {
    /// Output directory for built artifacts
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Space-separated glob patterns selecting suites by name (default: all)
    #[arg(short = 's', long = "suites")]
    pub suites: Option<String>,

    /// Suite root directory containing cmd/ and test_suites/
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Print each build step as it runs
    #[arg(long)]
    pub verbose: bool,

    /// Print the build plan without invoking the toolchain
    #[arg(long)]
    pub dry_run: bool,

    /// Unrecognized trailing arguments; warned about, never fatal
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<String>,
}

/// Flags that take a value; their value token belongs to them, not to the
/// unknown-argument warning.
const VALUE_FLAGS: [&str; 6] = ["-o", "--out", "-s", "--suites", "-i", "--input"];
/// Boolean flags.
const SWITCH_FLAGS: [&str; 2] = ["--verbose", "--dry-run"];

/// Separate the trailing catch-all into known flags (with their values) and
/// genuinely unknown tokens.
///
/// An unknown token makes clap route every later argument into the
/// catch-all, including valid flags that follow it; those must be recovered
/// rather than dropped with a warning.
fn partition_trailing_args(rest: &[String]) -> (Vec<String>, Vec<String>) {
    let mut known = Vec::new();
    let mut unknown = Vec::new();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        let name = arg.split_once('=').map(|(n, _)| n).unwrap_or(arg);
        if VALUE_FLAGS.contains(&name) {
            known.push(arg.clone());
            if !arg.contains('=') {
                if let Some(value) = iter.next() {
                    known.push(value.clone());
                }
            }
        } else if SWITCH_FLAGS.contains(&name) {
            known.push(arg.clone());
        } else {
            unknown.push(arg.clone());
        }
    }
    (known, unknown)
}

/// Recover known flags from the trailing catch-all and fold them into the
/// parsed CLI. Returns the normalized CLI plus the unknown tokens to warn
/// about.
fn reclaim_trailing_args(mut cli: Cli) -> Result<(Cli, Vec<String>), clap::Error> {
    if cli.rest.is_empty() {
        return Ok((cli, vec![]));
    }

    let (known, unknown) = partition_trailing_args(&cli.rest);
    cli.rest.clear();
    if !known.is_empty() {
        let mut args = vec!["citbuild".to_string()];
        args.extend(known);
        let reclaimed = Cli::try_parse_from(&args)?;
        cli.out = cli.out.or(reclaimed.out);
        cli.suites = cli.suites.or(reclaimed.suites);
        cli.input = cli.input.or(reclaimed.input);
        cli.verbose = cli.verbose || reclaimed.verbose;
        cli.dry_run = cli.dry_run || reclaimed.dry_run;
    }
    Ok((cli, unknown))
}

/// CLI entry point.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    run_with(cli)
}

fn run_with(cli: Cli) -> ExitCode {
    let (cli, unknown) = match reclaim_trailing_args(cli) {
        Ok(normalized) => normalized,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    for arg in &unknown {
        eprintln!("Warning: ignoring unknown argument '{}'", arg);
    }

    let mut config = match load_config(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let overrides = CliOverrides {
        out: cli.out,
        suite_root: cli.input,
        suites: cli.suites.as_deref().map(discovery::split_patterns),
    };
    merge_cli_overrides(&mut config, &overrides);

    let toolchain = GoToolchain::new(ToolchainSettings {
        command: config.toolchain.command.clone(),
        cgo_enabled: config.toolchain.cgo_enabled,
    });

    let pipeline = BuildPipeline::new(&toolchain, &config)
        .with_verbose(cli.verbose)
        .with_dry_run(cli.dry_run);

    match pipeline.run() {
        Ok(result) => {
            if result.is_success() {
                println!("{}", result.summary());
                ExitCode::from(EXIT_SUCCESS)
            } else {
                eprintln!("{}", result.summary());
                ExitCode::from(EXIT_ERROR)
            }
        }
        Err(e) => {
            eprintln!("Build error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
