//! Version file generation
//!
//! Writes the resolved suite version as a `.env` file for CI jobs and reads
//! it back.

use crate::{
    core::metadata::PackageMetadata,
    error::{Result, SetupError},
    utils::fs::FileSystemUtils,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, env, path::Path};
use tracing::{debug, info, instrument};

/// Version file generator
#[derive(Debug)]
pub struct VersionGenerator {
    fs_utils: FileSystemUtils,
}

/// Contents of a version file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Suite version
    pub version: String,
    /// Package name
    pub package_name: String,
    /// Git tag version (from CI_COMMIT_TAG or fallback to version)
    pub tag_version: String,
    /// Generation timestamp in RFC3339 format
    pub build_date: String,
}

impl VersionGenerator {
    pub fn new() -> Self {
        Self {
            fs_utils: FileSystemUtils::new(),
        }
    }

    /// Write version information for `metadata` to `output_file`
    #[instrument(skip(self, metadata, output_file))]
    pub fn generate<P: AsRef<Path>>(
        &self,
        metadata: &PackageMetadata,
        output_file: P,
    ) -> Result<VersionInfo> {
        let output_file = output_file.as_ref();
        info!("Writing version information to: {}", output_file.display());

        let version_info = self.create_version_info(metadata)?;
        let content = format_as_env_file(&version_info);

        self.fs_utils
            .write_file(output_file, content)
            .map_err(|e| SetupError::file_access("write", output_file, e))?;

        debug!("Version file contents: {:?}", version_info);
        Ok(version_info)
    }

    fn create_version_info(&self, metadata: &PackageMetadata) -> Result<VersionInfo> {
        let version = metadata
            .version
            .as_ref()
            .ok_or_else(|| SetupError::validation("Package version was not resolved"))?
            .to_string();

        let tag_version = env::var("CI_COMMIT_TAG").unwrap_or_else(|_| version.clone());

        Ok(VersionInfo {
            version,
            package_name: metadata.name.clone(),
            tag_version,
            build_date: Utc::now().to_rfc3339(),
        })
    }

    /// Load version information from an existing file
    #[instrument(skip(self, file_path))]
    pub fn load_from_file<P: AsRef<Path>>(&self, file_path: P) -> Result<VersionInfo> {
        let file_path = file_path.as_ref();
        debug!("Loading version information from: {}", file_path.display());

        let content = self
            .fs_utils
            .read_file_to_string(file_path)
            .map_err(|e| SetupError::file_access("read", file_path, e))?;

        Ok(parse_env_content(&content))
    }
}

impl Default for VersionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn format_as_env_file(info: &VersionInfo) -> String {
    format!(
        "VERSION={}\nPACKAGE_NAME={}\nTAG_VERSION={}\nBUILD_DATE={}\n",
        info.version, info.package_name, info.tag_version, info.build_date
    )
}

fn parse_env_content(content: &str) -> VersionInfo {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.trim(), value.trim().trim_matches('"'));
        }
    }

    let get = |key: &str, default: &str| {
        vars.get(key)
            .map_or_else(|| default.to_string(), |v| (*v).to_string())
    };

    VersionInfo {
        version: get("VERSION", "unknown"),
        package_name: get("PACKAGE_NAME", "unknown"),
        tag_version: get("TAG_VERSION", "unknown"),
        build_date: vars
            .get("BUILD_DATE")
            .map_or_else(|| Utc::now().to_rfc3339(), |v| (*v).to_string()),
    }
}
