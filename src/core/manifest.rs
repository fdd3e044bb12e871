//! Install manifest listing
//!
//! Expands the declared scripts and package directories into the concrete
//! files a packager would install. Nothing is copied.

use crate::{
    core::metadata::PackageMetadata,
    error::{Result, SetupError},
    utils::fs::FileSystemUtils,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Kind of installable file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Executable tool script
    Script,
    /// File belonging to a package directory
    PackageFile,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script => f.write_str("script"),
            Self::PackageFile => f.write_str("package"),
        }
    }
}

/// One installable file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub kind: EntryKind,
    /// Path relative to the project root
    pub source: PathBuf,
    /// Path relative to the install location
    pub install_path: PathBuf,
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.kind,
            self.source.display(),
            self.install_path.display()
        )
    }
}

/// Every file declared by the package metadata
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InstallManifest {
    pub entries: Vec<ManifestEntry>,
}

impl InstallManifest {
    /// Expand `metadata` against the files present under `root`
    #[instrument(skip(metadata))]
    pub fn build(root: &Path, metadata: &PackageMetadata) -> Result<Self> {
        let fs_utils = FileSystemUtils::new();
        let mut entries = Vec::new();

        for script in &metadata.scripts {
            let full = root.join(script);
            if !fs_utils.is_file(&full) {
                return Err(SetupError::file_access(
                    "stat",
                    full,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "script not found"),
                ));
            }

            let file_name = script
                .file_name()
                .ok_or_else(|| SetupError::manifest("Script path has no file name", script))?;

            entries.push(ManifestEntry {
                kind: EntryKind::Script,
                source: script.clone(),
                install_path: PathBuf::from(file_name),
            });
        }

        for package in &metadata.packages {
            let source_dir = metadata.source_dir(package);
            let files = Self::package_files(root, &source_dir, &fs_utils)?;
            debug!("Package {} has {} files", package, files.len());

            for relative in files {
                entries.push(ManifestEntry {
                    kind: EntryKind::PackageFile,
                    source: source_dir.join(&relative),
                    install_path: Path::new(package).join(&relative),
                });
            }
        }

        entries.sort();
        info!("Manifest lists {} files", entries.len());
        Ok(Self { entries })
    }

    /// Top-level `*.py` modules of `root/source_dir`. Subpackages and data
    /// files are not part of a plain package declaration.
    fn package_files(
        root: &Path,
        source_dir: &Path,
        fs_utils: &FileSystemUtils,
    ) -> Result<Vec<PathBuf>> {
        let base = root.join(source_dir);
        if !fs_utils.is_dir(&base) {
            return Err(SetupError::manifest("Package directory not found", base));
        }

        let pattern = format!(
            "{}/*.py",
            glob::Pattern::escape(&base.to_string_lossy())
        );
        let paths = glob::glob(&pattern).map_err(|e| {
            SetupError::manifest(format!("Invalid glob pattern {pattern}: {e}"), base.clone())
        })?;

        let mut files = Vec::new();
        for path_result in paths {
            match path_result {
                Ok(path) if fs_utils.is_file(&path) => {
                    if let Ok(relative) = path.strip_prefix(&base) {
                        files.push(relative.to_path_buf());
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Error reading path under {}: {}", base.display(), e),
            }
        }

        files.sort();
        Ok(files)
    }

    pub fn scripts(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Script)
    }

    pub fn package_files_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::PackageFile)
            .count()
    }
}
