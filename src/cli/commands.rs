//! Command implementations for the CLI

use crate::{
    cli::{Command, OutputFormat},
    config::Config,
    core::{manifest::InstallManifest, metadata::PackageMetadata, version::VersionResolver},
    utils::env::VersionGenerator,
};
use anyhow::Context;
use tracing::{info, instrument};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Version { .. } => execute_version_command(config),
        Command::Check => execute_check_command(config),
        Command::Metadata { format } => execute_metadata_command(config, *format),
        Command::Manifest => execute_manifest_command(config),
    }
}

fn resolver(config: &Config) -> anyhow::Result<VersionResolver> {
    VersionResolver::new(&config.root_dir, config.sources.clone())
        .context("Failed to create version resolver")
}

/// Package metadata with the resolved suite version filled in
fn resolved_metadata(config: &Config) -> anyhow::Result<PackageMetadata> {
    let version = resolver(config)?
        .resolve_suite_version()
        .context("Failed to resolve suite version")?;

    let metadata = config.metadata.with_version(version);
    metadata.validate().context("Invalid package metadata")?;
    Ok(metadata)
}

/// Execute the version command
#[instrument(skip(config))]
fn execute_version_command(config: &Config) -> anyhow::Result<()> {
    let metadata = resolved_metadata(config)?;

    if let Some(output_file) = &config.version_file {
        VersionGenerator::new()
            .generate(&metadata, output_file)
            .context("Failed to generate version file")?;
        info!("Version information written to {}", output_file.display());
    }

    if let Some(version) = &metadata.version {
        println!("{version}");
    }
    Ok(())
}

/// Execute the check command
#[instrument(skip(config))]
fn execute_check_command(config: &Config) -> anyhow::Result<()> {
    let suite = resolver(config)?
        .resolve_suite()
        .context("Failed to resolve tool versions")?;

    for tool in &suite.tools {
        println!("{}\t{}", tool.tool, tool.version);
    }

    let version = suite
        .ensure_consistent()
        .context("Tool versions are out of sync")?;
    info!("All tools agree on version {}", version);
    Ok(())
}

/// Execute the metadata command
#[instrument(skip(config))]
fn execute_metadata_command(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let metadata = resolved_metadata(config)?;

    match format {
        OutputFormat::Text => print!("{metadata}"),
        OutputFormat::Json => println!("{}", metadata.to_json()?),
    }
    Ok(())
}

/// Execute the manifest command
#[instrument(skip(config))]
fn execute_manifest_command(config: &Config) -> anyhow::Result<()> {
    let metadata = resolved_metadata(config)?;
    let manifest = InstallManifest::build(&config.root_dir, &metadata)
        .context("Failed to build install manifest")?;

    for entry in &manifest.entries {
        println!("{entry}");
    }

    info!(
        "{} scripts, {} package files",
        manifest.scripts().count(),
        manifest.package_files_count()
    );
    Ok(())
}
