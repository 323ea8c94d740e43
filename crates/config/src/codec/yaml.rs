//! YAML codec backed by `serde_yaml`.

use serde_yaml::Value;

use super::{Codec, CodecError, FlowStyle, is_blank, json_flow_text};
use crate::node::{Mapping, Node};

/// Reads and writes YAML documents.
///
/// Block output is regular indented YAML. Flow output is a single-line flow
/// document, written in the JSON-compatible subset of YAML flow syntax with
/// YAML line-break and non-printable code points escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Node, CodecError> {
        if is_blank(bytes) {
            return Ok(Node::Null);
        }
        let value: Value = serde_yaml::from_slice(bytes)?;
        value_to_node(value)
    }

    fn encode(&self, document: &Mapping, style: FlowStyle) -> Result<Vec<u8>, CodecError> {
        match style {
            FlowStyle::Block => Ok(serde_yaml::to_string(document)?.into_bytes()),
            FlowStyle::Flow => Ok(escape_non_printable(&json_flow_text(document)?).into_bytes()),
        }
    }
}

/// Code points that YAML folds (NEL, line and paragraph separators) or does
/// not allow unescaped inside a double-quoted scalar.
fn needs_escape(c: char) -> bool {
    matches!(
        c,
        '\u{7F}'..='\u{9F}' | '\u{2028}' | '\u{2029}' | '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// JSON structure is ASCII, so the escaped characters only occur inside
/// string scalars, where `\uXXXX` means the same in YAML as in JSON.
fn escape_non_printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if needs_escape(c) {
            out.push_str(&format!("\\u{:04X}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    out
}

fn value_to_node(value: Value) -> Result<Node, CodecError> {
    Ok(match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Node::Integer(i),
            None => n.as_f64().map(Node::Float).ok_or_else(|| {
                CodecError::Unsupported(format!("number {n} is out of range"))
            })?,
        },
        Value::String(s) => Node::String(s),
        Value::Sequence(items) => Node::Sequence(
            items
                .into_iter()
                .map(value_to_node)
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(entries) => {
            let mut mapping = Mapping::with_capacity(entries.len());
            for (key, value) in entries {
                mapping.insert(key_to_string(key)?, value_to_node(value)?);
            }
            Node::Mapping(mapping)
        }
        // Tags carry no meaning for configuration values.
        Value::Tagged(tagged) => value_to_node(tagged.value)?,
    })
}

fn key_to_string(key: Value) -> Result<String, CodecError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => key_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err(CodecError::Unsupported(
            "mapping keys must be scalars".to_string(),
        )),
    }
}
