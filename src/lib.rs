//! Citbuild - build-matrix orchestrator for the image validation test harness
//!
//! This library provides functionality to:
//! - Discover independently compilable test suites under a suite root
//! - Cross-compile helper and test binaries for every platform in the matrix
//! - Extract per-suite test-name manifests and package all artifacts into a
//!   single output directory

pub mod build;
pub mod cli;
pub mod config;
