//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the file-backed configuration for the resolved file and format.
//! - Load it and route the parsed command to its handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//!
//! Invariants:
//! - Every command except `path` loads the file first, creating it if needed.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use nestcfg::{Codec, DirectoryResources, FileConfiguration};

use crate::args::{Cli, Commands, Format};
use crate::commands;

/// Dispatch the parsed CLI to the handler for its subcommand.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let path = cli.resolve_file()?;
    let format = cli.resolve_format(&path);
    tracing::debug!(path = %path.display(), ?format, "Resolved configuration file");

    let mut out = std::io::stdout().lock();
    match format {
        Format::Yaml => run_with(FileConfiguration::new(path), cli, format, &mut out),
        Format::Json => run_with(FileConfiguration::json(path), cli, format, &mut out),
    }
}

fn run_with<C: Codec>(
    config: FileConfiguration<C>,
    cli: Cli,
    format: Format,
    out: &mut impl Write,
) -> Result<()> {
    let mut config = match &cli.defaults {
        Some(defaults) => with_defaults(config, defaults)?,
        None => config,
    };

    if let Commands::Path = cli.command {
        writeln!(out, "{}", config.absolute_path().display())?;
        return Ok(());
    }

    config
        .load()
        .with_context(|| format!("Failed to load {}", config.absolute_path().display()))?;

    match cli.command {
        Commands::Get { path } => commands::get::run(&config, &path, format, out),
        Commands::Set {
            path,
            value,
            string,
        } => commands::set::run(&mut config, &path, &value, string),
        Commands::Remove { path } => commands::remove::run(&mut config, &path),
        Commands::Keys { path, deep } => commands::keys::run(&config, path.as_deref(), deep, out),
        Commands::Dump { flow } => commands::dump::run(&config, flow, out),
        Commands::Path => Ok(()),
    }
}

/// Points the configuration at a default document to copy when the file is
/// created.
fn with_defaults<C: Codec>(
    config: FileConfiguration<C>,
    defaults: &Path,
) -> Result<FileConfiguration<C>> {
    let id = defaults
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid defaults file name: {}", defaults.display()))?
        .to_string();
    let root = match defaults.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    let mut config = config.with_resources(DirectoryResources::new(root));
    config.set_resource_path(id);
    Ok(config)
}
