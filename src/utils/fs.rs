//! File system helpers
//!
//! Thin wrappers that log what they touch. Callers attach path context
//! when turning the `io::Error` into a [`crate::error::SetupError`].

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, instrument};

/// Utility struct for file system operations
#[derive(Debug)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    pub fn new() -> Self {
        Self
    }

    /// Read raw file contents; the handle is closed on every path
    #[instrument(skip(self))]
    pub fn read_file<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> io::Result<Vec<u8>> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read(path)
    }

    /// Read file contents as string
    #[instrument(skip(self))]
    pub fn read_file_to_string<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        path: P,
    ) -> io::Result<String> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read_to_string(path)
    }

    /// Write content to a file, creating parent directories if needed
    #[instrument(skip(self, contents))]
    pub fn write_file<P: AsRef<Path> + std::fmt::Debug, C: AsRef<[u8]>>(
        &self,
        path: P,
        contents: C,
    ) -> io::Result<()> {
        let path = path.as_ref();
        debug!("Writing file: {}", path.display());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)
    }

    /// Check if a path exists and is a file
    pub fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Check if a path exists and is a directory
    pub fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_dir()
    }
}

impl Default for FileSystemUtils {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let file_path = temp_dir.path().join("subdir").join("version.env");
        fs_utils.write_file(&file_path, "VERSION=0.3\n").unwrap();

        let read_content = fs_utils.read_file_to_string(&file_path).unwrap();
        assert_eq!(read_content, "VERSION=0.3\n");
    }

    #[test]
    fn test_read_file_keeps_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let file_path = temp_dir.path().join("tegaki-build");
        fs::write(&file_path, b"# \xe9\n").unwrap();

        assert_eq!(fs_utils.read_file(&file_path).unwrap(), b"# \xe9\n");
        assert!(fs_utils.read_file_to_string(&file_path).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let err = fs_utils
            .read_file_to_string(temp_dir.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_is_file_and_is_dir() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let file_path = temp_dir.path().join("tegaki-eval");
        fs::write(&file_path, "content").unwrap();

        assert!(fs_utils.is_file(&file_path));
        assert!(!fs_utils.is_dir(&file_path));
        assert!(fs_utils.is_dir(temp_dir.path()));
        assert!(!fs_utils.is_file("nonexistent"));
    }
}
