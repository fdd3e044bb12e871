//! Package metadata for the tegaki-tools distribution
//!
//! Everything here is declared, not derived, except the version.

use crate::{
    core::version::VersionToken,
    error::{Result, SetupError},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Static package declaration plus the resolved suite version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub description: String,
    pub author: String,
    pub author_email: String,
    pub url: String,
    pub license: String,
    /// Resolved suite version; `None` until [`PackageMetadata::with_version`]
    pub version: Option<VersionToken>,
    /// Installable scripts, relative to the project root
    pub scripts: Vec<PathBuf>,
    /// Installable package names
    pub packages: Vec<String>,
    /// Package name -> source directory
    pub package_dir: BTreeMap<String, PathBuf>,
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            name: "tegaki-tools".to_string(),
            description: "A set of command-line tools for Tegaki.".to_string(),
            author: "Mathieu Blondel".to_string(),
            author_email: "mathieu ÂT mblondel DÔT org".to_string(),
            url: "http://www.tegaki.org".to_string(),
            license: "GPL".to_string(),
            version: None,
            scripts: vec![
                PathBuf::from("src/tegaki-convert"),
                PathBuf::from("src/tegaki-build"),
                PathBuf::from("src/tegaki-eval"),
            ],
            packages: vec!["tegakitools".to_string()],
            package_dir: BTreeMap::from([(
                "tegakitools".to_string(),
                PathBuf::from("src/tegakitools"),
            )]),
        }
    }
}

impl PackageMetadata {
    /// Copy of this declaration carrying the resolved version
    #[must_use]
    pub fn with_version(&self, version: VersionToken) -> Self {
        Self {
            version: Some(version),
            ..self.clone()
        }
    }

    /// Source directory for a package, defaulting to the package name
    pub fn source_dir(&self, package: &str) -> PathBuf {
        self.package_dir
            .get(package)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(package))
    }

    /// Reject declarations a packager could not use
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SetupError::validation("Package name is empty"));
        }

        match &self.version {
            None => return Err(SetupError::validation("Package version was not resolved")),
            Some(v) if v.as_str().is_empty() => {
                return Err(SetupError::validation("Package version is empty"));
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SetupError::Config {
            message: format!("Failed to serialize metadata: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

impl fmt::Display for PackageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.version.as_ref().map_or("unknown", VersionToken::as_str);
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "version: {version}")?;
        writeln!(f, "description: {}", self.description)?;
        writeln!(f, "author: {} <{}>", self.author, self.author_email)?;
        writeln!(f, "url: {}", self.url)?;
        writeln!(f, "license: {}", self.license)?;
        for script in &self.scripts {
            writeln!(f, "script: {}", script.display())?;
        }
        for package in &self.packages {
            writeln!(f, "package: {} -> {}", package, self.source_dir(package).display())?;
        }
        Ok(())
    }
}
