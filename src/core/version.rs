//! Suite version resolution
//!
//! Each tool script embeds a `VERSION = '<token>'` assignment. The suite
//! version is the greatest of those tokens under plain string ordering.

use crate::{
    config::ToolSource,
    error::{Result, SetupError, format_versions},
    utils::fs::FileSystemUtils,
};
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Pattern matched against the raw bytes of each tool script; the token
/// class is byte-wise so non-UTF-8 bytes inside the quotes still match
pub const VERSION_PATTERN: &str = r"VERSION = '((?-u:[^'])*)'";

/// Opaque version token, ordered byte-wise like any other string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Version extracted from one tool script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolVersion {
    /// Tool name, e.g. `tegaki-eval`
    pub tool: String,
    /// Path the token was read from
    pub path: PathBuf,
    /// Extracted token
    pub version: VersionToken,
}

/// Per-tool versions together with the chosen suite version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteVersion {
    pub tools: Vec<ToolVersion>,
    pub version: VersionToken,
}

impl SuiteVersion {
    /// Build from per-tool versions, picking the lexicographic maximum
    pub fn from_tools(tools: Vec<ToolVersion>) -> Option<Self> {
        let version = max_version(tools.iter().map(|t| t.version.clone()))?;
        Some(Self { tools, version })
    }

    /// True when at least two tools disagree
    pub fn has_drift(&self) -> bool {
        self.tools
            .windows(2)
            .any(|pair| pair[0].version != pair[1].version)
    }

    /// `(tool, version)` pairs in source order
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|t| (t.tool.clone(), t.version.to_string()))
            .collect()
    }

    /// Fail with [`SetupError::VersionDrift`] unless every tool agrees
    pub fn ensure_consistent(&self) -> Result<&VersionToken> {
        if self.has_drift() {
            return Err(SetupError::VersionDrift {
                versions: self.pairs(),
            });
        }
        Ok(&self.version)
    }
}

/// Lexicographic maximum; `"9.0"` beats `"10.0"`
pub fn max_version<I>(versions: I) -> Option<VersionToken>
where
    I: IntoIterator<Item = VersionToken>,
{
    versions.into_iter().max()
}

/// Reads version tokens out of tool scripts below a fixed root directory
#[derive(Debug)]
pub struct VersionResolver {
    root: PathBuf,
    sources: Vec<ToolSource>,
    re_version: Regex,
    fs_utils: FileSystemUtils,
}

impl VersionResolver {
    /// Create a resolver for the given root and tool sources
    pub fn new<P: Into<PathBuf>>(root: P, sources: Vec<ToolSource>) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            sources,
            re_version: Regex::new(VERSION_PATTERN).map_err(|e| SetupError::Config {
                message: format!("Failed to compile regex: {e}"),
                source: Some(Box::new(e)),
            })?,
            fs_utils: FileSystemUtils::new(),
        })
    }

    /// Root directory relative paths are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path against the root; absolute paths pass through
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.root.join(path.as_ref())
    }

    /// Extract the first `VERSION = '...'` token from a file
    #[instrument(skip(self))]
    pub fn extract_version<P: AsRef<Path> + fmt::Debug>(&self, path: P) -> Result<VersionToken> {
        let path = self.resolve_path(path);
        let content = self
            .fs_utils
            .read_file(&path)
            .map_err(|e| SetupError::file_access("read", path.clone(), e))?;

        let token = self.find_version(&content).ok_or_else(|| {
            SetupError::pattern_not_found(path.clone(), self.re_version.as_str())
        })?;

        debug!("Found version '{}' in {}", token, path.display());
        Ok(token)
    }

    /// First capture of the version pattern anywhere in `content`.
    /// Scripts need not be valid UTF-8; only the token is decoded.
    fn find_version(&self, content: &[u8]) -> Option<VersionToken> {
        self.re_version
            .captures(content)
            .and_then(|cap| cap.get(1))
            .map(|m| VersionToken::new(String::from_utf8_lossy(m.as_bytes())))
    }

    /// Extract every configured tool's version
    #[instrument(skip(self))]
    pub fn resolve_suite(&self) -> Result<SuiteVersion> {
        let mut tools = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let version = self.extract_version(&source.path)?;
            tools.push(ToolVersion {
                tool: source.name.clone(),
                path: self.resolve_path(&source.path),
                version,
            });
        }

        SuiteVersion::from_tools(tools)
            .ok_or_else(|| SetupError::config("No tool sources configured"))
    }

    /// The published suite version: the greatest tool token as a string
    #[instrument(skip(self))]
    pub fn resolve_suite_version(&self) -> Result<VersionToken> {
        let suite = self.resolve_suite()?;

        if suite.has_drift() {
            warn!(
                "Tool versions differ ({}); using '{}'",
                format_versions(&suite.pairs()),
                suite.version
            );
        }

        info!("Resolved suite version: {}", suite.version);
        Ok(suite.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn write_tool<C: AsRef<[u8]>>(dir: &TempDir, rel: &str, content: C) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn suite_dir(convert: &str, eval: &str, build: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        write_tool(&dir, "src/tegaki-convert", &format!("VERSION = '{convert}'\n"));
        write_tool(&dir, "src/tegaki-eval", &format!("VERSION = '{eval}'\n"));
        write_tool(&dir, "src/tegaki-build", &format!("VERSION = '{build}'\n"));
        dir
    }

    fn resolver(dir: &TempDir) -> VersionResolver {
        VersionResolver::new(dir.path(), Config::default().sources).unwrap()
    }

    #[test]
    fn test_extract_single_line() {
        let dir = TempDir::new().unwrap();
        write_tool(&dir, "tool", "VERSION = '1.2.3'");

        let version = resolver(&dir).extract_version("tool").unwrap();
        assert_eq!(version.as_str(), "1.2.3");
    }

    #[test]
    fn test_extract_embedded_first_match() {
        let dir = TempDir::new().unwrap();
        let content = r#"#!/usr/bin/env python
# -*- coding: utf-8 -*-
import sys

VERSION = '1.2.3'

def main():
    print("VERSION = '9.9.9'")
"#;
        write_tool(&dir, "tool", content);

        let version = resolver(&dir).extract_version("tool").unwrap();
        assert_eq!(version.as_str(), "1.2.3");
    }

    #[test]
    fn test_extract_ignores_non_utf8_outside_token() {
        let dir = TempDir::new().unwrap();
        write_tool(
            &dir,
            "tool",
            b"#!/usr/bin/env python\n# Auteur: Mathieu \xe9\nVERSION = '0.3'\n".as_slice(),
        );

        let version = resolver(&dir).extract_version("tool").unwrap();
        assert_eq!(version.as_str(), "0.3");
    }

    #[test]
    fn test_extract_non_utf8_token_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        write_tool(&dir, "tool", b"VERSION = '0.3\xff'\n".as_slice());

        let version = resolver(&dir).extract_version("tool").unwrap();
        assert_eq!(version.as_str(), "0.3\u{fffd}");
    }

    #[test]
    fn test_extract_empty_token() {
        let dir = TempDir::new().unwrap();
        write_tool(&dir, "tool", "VERSION = ''\n");

        let version = resolver(&dir).extract_version("tool").unwrap();
        assert_eq!(version.as_str(), "");
    }

    #[test]
    fn test_extract_requires_exact_shape() {
        let dir = TempDir::new().unwrap();
        write_tool(&dir, "tool", "VERSION = \"1.0\"\nVERSION='1.0'\nversion = '1.0'\n");

        let err = resolver(&dir).extract_version("tool").unwrap_err();
        assert!(matches!(err, SetupError::PatternNotFound { .. }));
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = TempDir::new().unwrap();

        let err = resolver(&dir).extract_version("does-not-exist").unwrap_err();
        match err {
            SetupError::FileAccess { path, .. } => {
                assert_eq!(path, dir.path().join("does-not-exist"));
            }
            other => panic!("Expected FileAccess, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_relative_to_root() {
        let dir = TempDir::new().unwrap();
        write_tool(&dir, "nested/tool", "VERSION = '0.1'\n");

        let resolver = resolver(&dir);
        assert_eq!(resolver.resolve_path("nested/tool"), dir.path().join("nested/tool"));
        assert_eq!(resolver.extract_version("nested/tool").unwrap().as_str(), "0.1");
    }

    #[test]
    fn test_resolve_suite_version_prefix_ordering() {
        let dir = suite_dir("0.3", "0.3.1", "0.2.9");

        let version = resolver(&dir).resolve_suite_version().unwrap();
        assert_eq!(version.as_str(), "0.3.1");
    }

    #[test]
    fn test_resolve_suite_version_is_lexicographic() {
        let dir = suite_dir("10.0", "9.0", "10.0");

        let version = resolver(&dir).resolve_suite_version().unwrap();
        assert_eq!(version.as_str(), "9.0");
    }

    #[test]
    fn test_resolve_suite_fails_if_any_tool_fails() {
        let dir = TempDir::new().unwrap();
        write_tool(&dir, "src/tegaki-convert", "VERSION = '0.3'\n");
        write_tool(&dir, "src/tegaki-eval", "no version here\n");
        write_tool(&dir, "src/tegaki-build", "VERSION = '0.3'\n");

        let err = resolver(&dir).resolve_suite_version().unwrap_err();
        assert!(matches!(err, SetupError::PatternNotFound { .. }));
    }

    #[test]
    fn test_resolve_suite_reports_tools_in_order() {
        let dir = suite_dir("0.3", "0.3.1", "0.2.9");

        let suite = resolver(&dir).resolve_suite().unwrap();
        let tools: Vec<_> = suite.tools.iter().map(|t| t.tool.as_str()).collect();
        assert_eq!(tools, vec!["tegaki-convert", "tegaki-eval", "tegaki-build"]);
        assert!(suite.has_drift());
        assert!(matches!(
            suite.ensure_consistent(),
            Err(SetupError::VersionDrift { .. })
        ));
    }

    #[test]
    fn test_consistent_suite() {
        let dir = suite_dir("0.3", "0.3", "0.3");

        let suite = resolver(&dir).resolve_suite().unwrap();
        assert!(!suite.has_drift());
        assert_eq!(suite.ensure_consistent().unwrap().as_str(), "0.3");
    }

    #[test]
    fn test_max_version_empty() {
        assert_eq!(max_version(Vec::new()), None);
        assert!(SuiteVersion::from_tools(Vec::new()).is_none());
    }
}
