//! # tegaki-setup
//!
//! Packaging support for the tegaki-tools command-line suite. The suite
//! version is not declared anywhere; it is read out of the three tool
//! scripts (`tegaki-convert`, `tegaki-eval`, `tegaki-build`), each of which
//! carries a `VERSION = '<token>'` line, and the greatest token by plain
//! string comparison wins.
//!
//! ## Features
//!
//! - Version extraction from tool scripts with explicit error reporting
//! - Suite version resolution with drift detection
//! - Static package metadata with the resolved version filled in
//! - Listing of the files the package declares for installation
//! - Version file generation for CI jobs
//!
//! ## Example
//!
//! ```no_run
//! use tegaki_setup::{config::Config, core::VersionResolver};
//!
//! let config = Config::default();
//! let resolver = VersionResolver::new(&config.root_dir, config.sources)?;
//! println!("tegaki-tools {}", resolver.resolve_suite_version()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging on stderr; `RUST_LOG` overrides the default level
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(debug)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Level used when `RUST_LOG` is unset
fn default_log_level(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(true), "debug");
        assert_eq!(default_log_level(false), "info");
    }
}
