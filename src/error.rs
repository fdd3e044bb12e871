//! Error types for tegaki-setup
//!
//! Every failure aborts the resolution step; nothing here is recoverable.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for version resolution and packaging metadata
#[derive(Error, Debug)]
pub enum SetupError {
    /// Source file missing or unreadable
    #[error("File access error: {operation} failed on {path}")]
    FileAccess {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File readable but holds no `VERSION = '...'` assignment
    #[error("No match for pattern `{pattern}` in {path}")]
    PatternNotFound { path: PathBuf, pattern: String },

    /// The tool scripts disagree on their version
    #[error("Version drift between tools: {}", format_versions(.versions))]
    VersionDrift { versions: Vec<(String, String)> },

    /// Errors while enumerating installable files
    #[error("Manifest error: {message} ({path})")]
    Manifest { message: String, path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

pub(crate) fn format_versions(versions: &[(String, String)]) -> String {
    versions
        .iter()
        .map(|(tool, version)| format!("{tool}={version}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl SetupError {
    /// Create a new file access error
    pub fn file_access<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileAccess {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new pattern-not-found error
    pub fn pattern_not_found<P: Into<PathBuf>>(path: P, pattern: impl Into<String>) -> Self {
        Self::PatternNotFound {
            path: path.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a new manifest error
    pub fn manifest<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::Manifest {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SetupError>;
