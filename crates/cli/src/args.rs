//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the target file and its format.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

/// File name used when no file is given.
const DEFAULT_FILE_NAME: &str = "config.yml";

#[derive(Parser)]
#[command(name = "nestcfg")]
#[command(about = "Read and edit hierarchical YAML/JSON configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  nestcfg --file app.yml set server.port 8080\n  nestcfg --file app.yml get server.port\n  nestcfg --file app.yml keys --deep\n  nestcfg --file app.json --format json dump\n"
)]
pub struct Cli {
    /// Configuration file to operate on (created on first use)
    #[arg(short, long, global = true, env = "NESTCFG_FILE", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Document format; inferred from the file extension when omitted
    #[arg(long, global = true, value_enum)]
    pub format: Option<Format>,

    /// Default document copied into the file if it has to be created
    #[arg(long, global = true, value_name = "FILE")]
    pub defaults: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value stored at a path
    Get {
        /// Dot-separated path (e.g. server.port)
        path: String,
    },

    /// Store a value at a path and save the file
    Set {
        /// Dot-separated path; missing parents are created
        path: String,

        /// Value, parsed as YAML (`8080`, `true`, `[a, b]`, `{k: v}`)
        value: String,

        /// Store the value as a string without parsing it
        #[arg(long)]
        string: bool,
    },

    /// Remove the value at a path and save the file
    Remove {
        /// Dot-separated path
        path: String,
    },

    /// List keys of the document or of the section at a path
    Keys {
        /// Section to list; the document root when omitted
        path: Option<String>,

        /// Include nested paths
        #[arg(short, long)]
        deep: bool,
    },

    /// Print the whole document
    Dump {
        /// Render containers inline on a single line
        #[arg(long)]
        flow: bool,
    },

    /// Print the absolute path of the configuration file
    Path,
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Picks JSON for `.json` files and YAML for everything else.
    pub fn infer(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

impl Cli {
    /// Resolves the configuration file: `--file`, then `NESTCFG_FILE`, then
    /// the platform configuration directory.
    ///
    /// Blank values are ignored so an empty environment variable falls back
    /// to the default location.
    pub fn resolve_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.file
            && !path.as_os_str().to_string_lossy().trim().is_empty()
        {
            return Ok(path.clone());
        }
        default_config_path()
    }

    pub fn resolve_format(&self, path: &Path) -> Format {
        self.format.unwrap_or_else(|| Format::infer(path))
    }
}

/// Returns the default path to the configuration file:
/// - Linux: `~/.config/nestcfg/config.yml`
/// - macOS: `~/Library/Application Support/nestcfg/config.yml`
/// - Windows: `%AppData%\nestcfg\config\config.yml`
pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", "nestcfg")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join(DEFAULT_FILE_NAME))
}
