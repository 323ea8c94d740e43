//! Proptest strategies for node trees.
//!
//! Generated trees only contain values every codec round-trips exactly:
//! finite floats and keys without the path separator.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::node::{Mapping, Node};

/// Keys that are addressable by path.
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,8}"
}

/// A dot-path of one to four segments.
pub fn arb_path() -> impl Strategy<Value = String> {
    vec(arb_key(), 1..=4).prop_map(|segments| segments.join("."))
}

/// Free text, plus strings that look like other scalar types.
pub fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z][a-zA-Z0-9 _-]{0,15}",
        1 => prop_oneof![
            Just(String::new()),
            Just("true".to_string()),
            Just("null".to_string()),
            Just("42".to_string()),
            Just("1.5".to_string()),
            Just(" padded ".to_string()),
        ],
    ]
}

/// Scalar nodes, including null.
pub fn arb_scalar() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::Bool),
        any::<i64>().prop_map(Node::Integer),
        (-1.0e9f64..1.0e9f64).prop_map(Node::Float),
        arb_text().prop_map(Node::String),
    ]
}

/// Arbitrary trees up to a few levels deep.
pub fn arb_node() -> impl Strategy<Value = Node> {
    arb_scalar().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..6).prop_map(Node::Sequence),
            vec((arb_key(), inner), 0..6).prop_map(|entries| {
                Node::Mapping(entries.into_iter().collect())
            }),
        ]
    })
}

/// Arbitrary document roots.
pub fn arb_mapping() -> impl Strategy<Value = Mapping> {
    vec((arb_key(), arb_node()), 0..8).prop_map(|entries| entries.into_iter().collect())
}
