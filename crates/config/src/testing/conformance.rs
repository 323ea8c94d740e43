//! Reusable conformance checks for section implementations.
//!
//! Each check takes a fresh, empty section from the factory and panics on the
//! first violated expectation, so it can be called from any `#[test]`.

use std::fs;

use crate::codec::Codec;
use crate::file::FileConfiguration;
use crate::node::Node;
use crate::section::{ConfigurationSection, ConfigurationSectionMut};

/// Runs every in-memory check against sections produced by `make`.
pub fn run_all<S, F>(mut make: F)
where
    S: ConfigurationSectionMut,
    F: FnMut() -> S,
{
    check_absence_is_total(make());
    check_set_then_get(make());
    check_auto_creation(make());
    check_destructive_overwrite(make());
    check_remove(make());
    check_section_writes_through(make());
    check_typed_defaults(make());
}

/// Runs the in-memory checks plus the persistence checks against
/// file-backed configurations produced by `make`.
///
/// Every configuration returned by `make` must point at its own, not yet
/// existing file.
pub fn run_file_suite<C, F>(mut make: F)
where
    C: Codec,
    F: FnMut() -> FileConfiguration<C>,
{
    run_all(&mut make);
    check_save_load_round_trip(make());
    check_failed_load_preserves_memory(make());
    check_load_replaces_memory(make());
}

pub fn check_absence_is_total<S: ConfigurationSectionMut>(section: S) {
    assert_eq!(section.get("a.b.c"), None);
    assert_eq!(section.get(""), None);
    assert_eq!(section.get_string("a"), None);
    assert!(!section.contains("a.b"));
    assert!(section.keys(true).is_empty());
    assert!(section.section("a").is_none());
}

pub fn check_set_then_get<S: ConfigurationSectionMut>(mut section: S) {
    section.set("flag", true);
    section.set("count", 42);
    section.set("ratio", 0.25);
    section.set("name", "value");
    section.set("list", vec!["a", "b"]);
    section.set("empty", Node::Null);

    assert_eq!(section.get_bool("flag"), Some(true));
    assert_eq!(section.get_int("count"), Some(42));
    assert_eq!(section.get_float("ratio"), Some(0.25));
    assert_eq!(section.get_string("name").as_deref(), Some("value"));
    assert_eq!(
        section.get_string_list("list"),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(section.get("empty"), Some(&Node::Null));
    assert!(section.contains("empty"));

    section.set("count", 7);
    assert_eq!(section.get_int("count"), Some(7));
}

pub fn check_auto_creation<S: ConfigurationSectionMut>(mut section: S) {
    section.set("a.b.c", 5);

    let keys = section.keys(true);
    for expected in ["a", "a.b", "a.b.c"] {
        assert!(
            keys.iter().any(|k| k == expected),
            "keys(true) = {keys:?} should contain {expected:?}"
        );
    }
    assert_eq!(section.keys(false), vec!["a"]);
    assert_eq!(section.get_int("a.b.c"), Some(5));
}

pub fn check_destructive_overwrite<S: ConfigurationSectionMut>(mut section: S) {
    section.set("a", "scalar");
    section.set("a.b", 1);

    let a = section.get("a").and_then(Node::as_mapping);
    assert!(a.is_some(), "'a' should have become a mapping");
    assert_eq!(a.map(|m| m.len()), Some(1));
    assert_eq!(section.get_int("a.b"), Some(1));
    assert_eq!(section.get_string("a"), None);
}

pub fn check_remove<S: ConfigurationSectionMut>(mut section: S) {
    section.set("a.b", 1);
    section.set("a.c", 2);

    assert_eq!(section.remove("a.b"), Some(Node::Integer(1)));
    assert_eq!(section.remove("a.b"), None);
    assert_eq!(section.remove("x.y.z"), None);
    assert!(!section.contains("x"));
    assert_eq!(section.keys(true), vec!["a", "a.c"]);
}

pub fn check_section_writes_through<S: ConfigurationSectionMut>(mut section: S) {
    {
        let mut child = section.section_mut("child");
        child.set("value", 1);
        child.section_mut("grand").set("value", 2);
    }

    assert_eq!(section.get_int("child.value"), Some(1));
    assert_eq!(section.get_int("child.grand.value"), Some(2));

    let child = section.section("child");
    assert_eq!(child.and_then(|c| c.get_int("grand.value")), Some(2));
}

pub fn check_typed_defaults<S: ConfigurationSectionMut>(mut section: S) {
    section.set("port", "8080");
    section.set("host", "localhost");

    assert_eq!(section.get_or("port", 0u16), 8080);
    assert_eq!(section.get_or("host", 0u16), 0);
    assert!(section.get_or("missing", true));
    assert_eq!(section.get_as::<bool>("host"), None);
}

pub fn check_save_load_round_trip<C: Codec>(mut config: FileConfiguration<C>) {
    config.set("server.host", "localhost");
    config.set("server.port", 8080);
    config.set("features", vec!["a", "b"]);
    config.set("ratio", 1.5);
    config.save().expect("save should succeed");

    let expected = config.mapping().clone();
    config.clear();
    config.load().expect("load should succeed");

    assert_eq!(config.mapping(), &expected);
    assert_eq!(config.get_int("server.port"), Some(8080));
}

pub fn check_failed_load_preserves_memory<C: Codec>(mut config: FileConfiguration<C>) {
    config.set("kept", "value");
    if let Some(parent) = config.absolute_path().parent() {
        fs::create_dir_all(parent).expect("parent directory should be creatable");
    }
    fs::write(config.absolute_path(), "key: [unclosed\n{ invalid").expect("write corrupt file");

    assert!(config.load().is_err());
    assert_eq!(config.get_string("kept").as_deref(), Some("value"));
}

pub fn check_load_replaces_memory<C: Codec>(mut config: FileConfiguration<C>) {
    config.load().expect("first load should succeed");
    config.set("only.in.memory", true);
    config.load().expect("second load should succeed");
    assert!(!config.contains("only"));
}
