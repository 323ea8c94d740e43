//! `nestcfg dump`: print the whole document.

use std::io::Write;

use anyhow::Result;
use nestcfg::{Codec, ConfigurationSection, FileConfiguration, FlowStyle};

pub fn run<C: Codec>(config: &FileConfiguration<C>, flow: bool, out: &mut impl Write) -> Result<()> {
    let style = if flow { FlowStyle::Flow } else { FlowStyle::Block };
    let bytes = config.codec().encode(config.mapping(), style)?;
    out.write_all(&bytes)?;
    Ok(())
}
