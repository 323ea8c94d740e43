//! `nestcfg remove`: delete the value at a path and save.

use anyhow::{Context, Result};
use nestcfg::{Codec, ConfigurationSectionMut, FileConfiguration};

use crate::error::CliError;

pub fn run<C: Codec>(config: &mut FileConfiguration<C>, path: &str) -> Result<()> {
    config
        .remove(path)
        .ok_or_else(|| CliError::NotFound(path.to_string()))?;
    config.save().context("Failed to save configuration")?;
    Ok(())
}
