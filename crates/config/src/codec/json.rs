//! JSON codec backed by `serde_json`.

use super::{Codec, CodecError, FlowStyle, encode_json_flow, ensure_finite, is_blank};
use crate::node::{Mapping, Node};

/// Reads and writes JSON documents. Block output is pretty-printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Node, CodecError> {
        if is_blank(bytes) {
            return Ok(Node::Null);
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, document: &Mapping, style: FlowStyle) -> Result<Vec<u8>, CodecError> {
        match style {
            FlowStyle::Block => {
                document.values().try_for_each(ensure_finite)?;
                let mut bytes = serde_json::to_vec_pretty(document)?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            FlowStyle::Flow => encode_json_flow(document),
        }
    }
}
