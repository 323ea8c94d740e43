//! Property-based tests for codecs and path access.
//!
//! These tests verify that node trees survive encoding and decoding, and that
//! path writes are observable through path reads, using randomly generated
//! inputs to catch edge cases that might not be covered by unit tests.
//!
//! Test coverage:
//! - YAML and JSON round-trips in block and flow style
//! - set/get idempotence for generated paths and values
//! - keys(true) listing every prefix of a written path

use proptest::prelude::*;

use nestcfg::testing::generators::{arb_mapping, arb_node, arb_path};
use nestcfg::{
    Codec, ConfigurationSection, ConfigurationSectionMut, FlowStyle, JsonCodec, MemorySection,
    Node, YamlCodec,
};

fn round_trip(codec: &impl Codec, style: FlowStyle, document: &nestcfg::Mapping) -> Node {
    let bytes = codec.encode(document, style).unwrap();
    codec.decode(&bytes).unwrap()
}

proptest! {
    #[test]
    fn prop_yaml_block_round_trip(document in arb_mapping()) {
        let decoded = round_trip(&YamlCodec, FlowStyle::Block, &document);
        prop_assert_eq!(decoded, Node::Mapping(document));
    }

    #[test]
    fn prop_yaml_flow_round_trip(document in arb_mapping()) {
        let decoded = round_trip(&YamlCodec, FlowStyle::Flow, &document);
        prop_assert_eq!(decoded, Node::Mapping(document));
    }

    #[test]
    fn prop_json_round_trip(document in arb_mapping()) {
        let decoded = round_trip(&JsonCodec, FlowStyle::Block, &document);
        prop_assert_eq!(decoded, Node::Mapping(document));
    }

    #[test]
    fn prop_set_then_get(path in arb_path(), value in arb_node()) {
        let mut section = MemorySection::new();
        section.set(&path, value.clone());
        prop_assert_eq!(section.get(&path), Some(&value));
        prop_assert!(section.contains(&path));
    }

    #[test]
    fn prop_set_overwrites_existing_tree(
        initial in arb_mapping(),
        path in arb_path(),
        value in arb_node(),
    ) {
        let mut section = MemorySection::from(initial);
        section.set(&path, value.clone());
        prop_assert_eq!(section.get(&path), Some(&value));
    }

    #[test]
    fn prop_deep_keys_contain_every_prefix(path in arb_path()) {
        let mut section = MemorySection::new();
        section.set(&path, 1);

        let keys = section.keys(true);
        let segments: Vec<&str> = path.split('.').collect();
        for end in 1..=segments.len() {
            let prefix = segments[..end].join(".");
            prop_assert!(keys.contains(&prefix), "{:?} missing {}", keys, prefix);
        }
    }

    #[test]
    fn prop_remove_after_set(path in arb_path(), value in arb_node()) {
        let mut section = MemorySection::new();
        section.set(&path, value.clone());
        prop_assert_eq!(section.remove(&path), Some(value));
        prop_assert!(!section.contains(&path));
    }
}
