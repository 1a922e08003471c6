//! Configuration for citbuild runs.
//!
//! Configuration comes from an optional `citbuild.toml` discovered by
//! walking up from the working directory, with CLI flags overriding file
//! values.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
