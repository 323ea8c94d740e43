//! Conversion between raw documents and the node tree.
//!
//! Responsibilities:
//! - Define the `Codec` strategy injected into `FileConfiguration`.
//! - Provide YAML (`YamlCodec`) and JSON (`JsonCodec`) implementations.
//!
//! Does NOT handle:
//! - File I/O (see `file.rs`).
//! - Enforcing a mapping at the top level; `decode` returns whatever the
//!   document holds and the caller decides.
//!
//! Invariants:
//! - An empty document decodes to `Node::Null`.
//! - `empty_document()` decodes to an empty mapping.

mod json;
mod yaml;

pub use json::JsonCodec;
pub use yaml::YamlCodec;

use crate::node::{Mapping, Node};

/// Container rendering policy for encoded output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowStyle {
    /// Expanded, one entry per line. Meant for hand-edited files.
    #[default]
    Block,
    /// Compact, inline containers on a single line.
    Flow,
}

/// Errors raised at the codec boundary.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported value: {0}")]
    Unsupported(String),
}

/// Encoder/decoder pair for one textual document format.
pub trait Codec {
    /// Short format name used in logs (e.g. `"yaml"`).
    fn name(&self) -> &'static str;

    /// Parses `bytes` into a node tree.
    fn decode(&self, bytes: &[u8]) -> Result<Node, CodecError>;

    /// Renders `document` using the requested container style.
    fn encode(&self, document: &Mapping, style: FlowStyle) -> Result<Vec<u8>, CodecError>;

    /// Contents written to a newly created file that has no default resource.
    fn empty_document(&self) -> &'static [u8] {
        b"{}\n"
    }
}

/// Fails on NaN or infinite floats, which have no JSON representation.
pub(crate) fn ensure_finite(node: &Node) -> Result<(), CodecError> {
    match node {
        Node::Float(f) if !f.is_finite() => Err(CodecError::Unsupported(format!(
            "non-finite float {f} cannot be written as JSON"
        ))),
        Node::Sequence(items) => items.iter().try_for_each(ensure_finite),
        Node::Mapping(mapping) => mapping.values().try_for_each(ensure_finite),
        _ => Ok(()),
    }
}

/// Compact single-line JSON, shared by JSON flow output and YAML flow output.
pub(crate) fn json_flow_text(document: &Mapping) -> Result<String, CodecError> {
    document.values().try_for_each(ensure_finite)?;
    let mut text = serde_json::to_string(document)?;
    text.push('\n');
    Ok(text)
}

pub(crate) fn encode_json_flow(document: &Mapping) -> Result<Vec<u8>, CodecError> {
    json_flow_text(document).map(String::into_bytes)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}
