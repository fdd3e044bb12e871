//! Configuration management for tegaki-setup
//!
//! Centralizes the project root, the tool scripts to read versions from,
//! and the static package declaration.

use crate::{
    cli::{Args, Command},
    core::metadata::PackageMetadata,
    error::SetupError,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Project root; every relative path below is resolved against it
    pub root_dir: PathBuf,
    /// Tool scripts carrying a `VERSION = '...'` line
    pub sources: Vec<ToolSource>,
    /// Where `version --output-file` writes to
    pub version_file: Option<PathBuf>,
    /// Static package declaration (version is filled in at runtime)
    pub metadata: PackageMetadata,
}

/// A named tool script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSource {
    /// Tool name
    pub name: String,
    /// Path relative to the project root
    pub path: PathBuf,
}

impl ToolSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            root_dir: PathBuf::from("."),
            sources: vec![
                ToolSource::new("tegaki-convert", "src/tegaki-convert"),
                ToolSource::new("tegaki-eval", "src/tegaki-eval"),
                ToolSource::new("tegaki-build", "src/tegaki-build"),
            ],
            version_file: None,
            metadata: PackageMetadata::default(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, SetupError> {
        let root_dir = std::path::absolute(&args.root).map_err(|e| {
            SetupError::file_access("resolve", args.root.clone(), e)
        })?;

        let mut config = Self {
            debug: args.debug,
            root_dir,
            ..Self::default()
        };

        if let Command::Version { output_file } = &args.command {
            config.version_file = output_file.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.root_dir.is_dir() {
            return Err(SetupError::validation(format!(
                "Project root not found: {}",
                self.root_dir.display()
            )));
        }

        if self.sources.is_empty() {
            return Err(SetupError::validation("No tool sources configured"));
        }

        Ok(())
    }
}
