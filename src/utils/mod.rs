//! Utility modules for common functionality
//!
//! File helpers and version file generation.

pub mod env;
pub mod fs;

pub use env::{VersionGenerator, VersionInfo};
pub use fs::FileSystemUtils;
