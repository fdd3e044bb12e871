//! Core functionality for tegaki-tools packaging
//!
//! Version resolution across the tool scripts, the package declaration,
//! and the listing of installable files.

pub mod manifest;
pub mod metadata;
pub mod version;

pub use manifest::{EntryKind, InstallManifest, ManifestEntry};
pub use metadata::PackageMetadata;
pub use version::{SuiteVersion, ToolVersion, VersionResolver, VersionToken};
