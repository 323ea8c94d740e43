//! `nestcfg set`: store a value at a path and save.

use anyhow::{Context, Result};
use nestcfg::{Codec, ConfigurationSectionMut, FileConfiguration, Node, YamlCodec};

use crate::error::CliError;

pub fn run<C: Codec>(
    config: &mut FileConfiguration<C>,
    path: &str,
    value: &str,
    as_string: bool,
) -> Result<()> {
    let node = if as_string {
        Node::from(value)
    } else {
        parse_value(value)?
    };

    tracing::debug!(path, kind = node.type_name(), "Setting value");
    config.set(path, node);
    config.save().context("Failed to save configuration")?;
    Ok(())
}

/// Parses a command-line value as a YAML scalar or flow document.
pub(crate) fn parse_value(value: &str) -> Result<Node, CliError> {
    if value.trim().is_empty() {
        return Ok(Node::from(value));
    }
    YamlCodec
        .decode(value.as_bytes())
        .map_err(|e| CliError::InvalidValue {
            value: value.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::loaded_yaml;
    use nestcfg::ConfigurationSection;
    use nestcfg::testing::mapping;

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("8080").unwrap(), Node::Integer(8080));
        assert_eq!(parse_value("true").unwrap(), Node::Bool(true));
        assert_eq!(parse_value("0.5").unwrap(), Node::Float(0.5));
        assert_eq!(parse_value("hello world").unwrap(), Node::from("hello world"));
        assert_eq!(parse_value("[a, b]").unwrap(), Node::from(vec!["a", "b"]));
        assert_eq!(
            parse_value("{k: v}").unwrap(),
            Node::Mapping(mapping([("k", "v")]))
        );
        assert_eq!(parse_value("").unwrap(), Node::from(""));
    }

    #[test]
    fn test_parse_value_rejects_malformed() {
        let err = parse_value("[unclosed").unwrap_err();
        assert!(matches!(err, CliError::InvalidValue { .. }));
    }

    #[test]
    fn test_set_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = loaded_yaml(dir.path(), "");

        run(&mut config, "server.port", "9090", false).unwrap();
        run(&mut config, "server.name", "42", true).unwrap();

        assert_eq!(config.get_int("server.port"), Some(9090));
        assert_eq!(config.get("server.name"), Some(&Node::from("42")));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("config.yml")).unwrap(),
            "server:\n  port: 9090\n  name: '42'\n"
        );
    }
}
