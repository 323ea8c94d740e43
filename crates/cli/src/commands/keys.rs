//! `nestcfg keys`: list keys of the document or of a section.

use std::io::Write;

use anyhow::Result;
use nestcfg::{ConfigurationSection, FileConfiguration};

use crate::error::CliError;

pub fn run<C>(
    config: &FileConfiguration<C>,
    path: Option<&str>,
    deep: bool,
    out: &mut impl Write,
) -> Result<()> {
    let keys = match path {
        Some(path) => config
            .section(path)
            .ok_or_else(|| CliError::NotASection {
                path: path.to_string(),
            })?
            .keys(deep),
        None => config.keys(deep),
    };
    for key in keys {
        writeln!(out, "{key}")?;
    }
    Ok(())
}
