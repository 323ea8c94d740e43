//! Command handlers.
//!
//! Each handler receives an already loaded configuration. Handlers that
//! print take the output writer as a parameter so tests can capture it.

pub mod dump;
pub mod get;
pub mod keys;
pub mod remove;
pub mod set;

use anyhow::Result;
use nestcfg::Node;

use crate::args::Format;

/// Renders a node for terminal output.
///
/// Scalars print as plain text. Containers print as a block YAML or
/// pretty-printed JSON document, matching the file's format.
pub(crate) fn render_node(node: &Node, format: Format) -> Result<String> {
    let mut text = match node {
        Node::Sequence(_) | Node::Mapping(_) => match format {
            Format::Yaml => serde_yaml::to_string(node)?,
            Format::Json => serde_json::to_string_pretty(node)?,
        },
        scalar => scalar.to_string(),
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}


#[cfg(test)]
mod tests {
    use super::*;
    use nestcfg::testing::mapping;

    #[test]
    fn test_render_scalars_plain() {
        assert_eq!(render_node(&Node::from("text"), Format::Yaml).unwrap(), "text\n");
        assert_eq!(render_node(&Node::Integer(3), Format::Json).unwrap(), "3\n");
        assert_eq!(render_node(&Node::Null, Format::Yaml).unwrap(), "null\n");
    }

    #[test]
    fn test_render_containers_by_format() {
        let node = Node::Mapping(mapping([("a", 1)]));
        assert_eq!(render_node(&node, Format::Yaml).unwrap(), "a: 1\n");
        assert_eq!(render_node(&node, Format::Json).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
