//! `nestcfg get`: print the value at a path.

use std::io::Write;

use anyhow::Result;
use nestcfg::{ConfigurationSection, FileConfiguration};

use super::render_node;
use crate::args::Format;
use crate::error::CliError;

pub fn run<C>(
    config: &FileConfiguration<C>,
    path: &str,
    format: Format,
    out: &mut impl Write,
) -> Result<()> {
    let node = config
        .get(path)
        .ok_or_else(|| CliError::NotFound(path.to_string()))?;
    out.write_all(render_node(node, format)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::loaded_yaml;

    #[test]
    fn test_get_scalar_and_section() {
        let dir = tempfile::tempdir().unwrap();
        let config = loaded_yaml(dir.path(), "server:\n  port: 8080\n");

        let mut out = Vec::new();
        run(&config, "server.port", Format::Yaml, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "8080\n");

        let mut out = Vec::new();
        run(&config, "server", Format::Yaml, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "port: 8080\n");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = loaded_yaml(dir.path(), "a: 1\n");

        let err = run(&config, "a.b", Format::Yaml, &mut Vec::new()).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::NotFound(p)) if p == "a.b"));
    }
}
