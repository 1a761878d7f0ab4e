//! CLI command handlers.
//!
//! This module provides headless, scriptable access to the catalog and the
//! compatibility checker for automation and CI use.

pub mod check;
pub mod common;
pub mod config;
pub mod parts;

// Re-export types used by main.rs and tests
pub use check::CheckArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use parts::PartsArgs;
