//! Command-line argument parsing and validation

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tegaki-setup - version resolution and package metadata for tegaki-tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "tegaki-setup")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Project root containing the tool scripts
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the suite version (greatest of the tool versions)
    Version {
        /// Also write version information to this file
        #[arg(short = 'o', long = "output-file")]
        output_file: Option<PathBuf>,
    },

    /// Fail unless every tool declares the same version
    Check,

    /// Print the package metadata
    Metadata {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the files the package declares for installation
    Manifest,
}

/// Metadata output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
