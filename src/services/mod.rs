//! Service layer for file I/O around builds.

pub mod builds;

// Re-export commonly used types
pub use builds::{BuildFormat, BuildService};
