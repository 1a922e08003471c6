//! Suite discovery and selection.
//!
//! Each immediate subdirectory of `<suite_root>/test_suites` is a candidate
//! suite; non-directory entries are skipped. Selection is by glob patterns
//! matched against the directory name. Results are sorted lexicographically
//! so the build order is reproducible across filesystems.

use glob::Pattern;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Subtree of the suite root that holds suite directories.
pub const SUITES_DIR: &str = "test_suites";

/// Error during suite discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A selection pattern is not valid glob syntax.
    #[error("invalid suite pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// The suite root (or its `test_suites` subtree) cannot be read.
    #[error("cannot read suite root {path}: {source}")]
    UnreadableRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One discovered test suite: a self-contained compilable test directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    /// Directory name, used in every artifact filename.
    pub name: String,
    /// Absolute or root-relative path to the suite source directory.
    pub source_path: PathBuf,
}

/// Split a space-separated pattern string into individual patterns.
pub fn split_patterns(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Discover suites under `<suite_root>/test_suites` whose names match at
/// least one of `patterns`. An empty pattern list selects every suite.
pub fn discover_suites(suite_root: &Path, patterns: &[String]) -> Result<Vec<Suite>, DiscoveryError> {
    let compiled: Vec<Pattern> = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| DiscoveryError::InvalidPattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<Result<_, _>>()?;

    let dir = suite_root.join(SUITES_DIR);
    let entries = std::fs::read_dir(&dir)
        .map_err(|source| DiscoveryError::UnreadableRoot { path: dir.clone(), source })?;

    let mut suites = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|source| DiscoveryError::UnreadableRoot { path: dir.clone(), source })?;
        let path = entry.path();
        // Only directories are suites; a stray file matching a pattern is not.
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if compiled.is_empty() || compiled.iter().any(|p| p.matches(&name)) {
            suites.push(Suite { name, source_path: path });
        }
    }

    suites.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(suites)
}
