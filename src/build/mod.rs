//! Build pipeline module for citbuild
//!
//! Provides the core orchestration for compiling helper binaries and test
//! suite binaries across the platform matrix and packaging them (plus
//! test-name manifests) into a single output directory.
//!
//! # Overview
//!
//! The pipeline consists of:
//! - **Discovery**: find test suites under the suite root, selected by glob
//!   patterns
//! - **Helpers**: build the fixed `wrapper` and `manager` binaries
//! - **Suites**: per suite, drive the toolchain across the matrix and
//!   extract the test-name manifest
//!
//! # Example
//!
//! ```ignore
//! use citbuild::build::{BuildPipeline, GoToolchain, ToolchainSettings};
//! use citbuild::config::load_config;
//!
//! let config = load_config(None)?;
//! let toolchain = GoToolchain::new(ToolchainSettings::default());
//! let result = BuildPipeline::new(&toolchain, &config).run()?;
//! println!("{}", result.summary());
//! ```

pub mod discovery;
pub mod pipeline;
pub mod platform;
pub mod result;
pub mod suite;
pub mod toolchain;

pub use discovery::*;
pub use pipeline::*;
pub use platform::*;
pub use result::*;
pub use suite::*;
pub use toolchain::*;
