//! Path-addressed access to configuration mappings.
//!
//! Responsibilities:
//! - Resolve dot-paths against a backing `Mapping` for reads and writes.
//! - Provide typed getters with lenient conversion (see `FromNode`).
//! - Provide owned (`MemorySection`) and borrowed (`Section`, `SectionMut`)
//!   section types.
//!
//! Does NOT handle:
//! - File I/O or encoding (see `file.rs` and `codec/`).
//!
//! Invariants:
//! - Reads never fail and never modify the tree; a missing key or a
//!   non-mapping intermediate resolves to `None`.
//! - Writes create missing intermediate mappings and replace non-mapping
//!   intermediates with fresh mappings.
//! - Borrowed views mutate the tree they were taken from.

use std::collections::HashSet;

use crate::node::{FromNode, Mapping, Node};
use crate::path;

/// Walks `path` through existing mappings, returning `None` on any miss.
fn lookup<'a>(root: &'a Mapping, path: &str) -> Option<&'a Node> {
    let (parent, key) = path::split_last(path);
    let container = match parent {
        Some(parent) => mapping_at(root, parent)?,
        None => root,
    };
    container.get(key)
}

fn mapping_at<'a>(root: &'a Mapping, path: &str) -> Option<&'a Mapping> {
    path::segments(path).try_fold(root, |current, segment| current.get(segment)?.as_mapping())
}

/// Walks `path`, creating or replacing nodes so every segment is a mapping.
fn mapping_at_mut<'a>(root: &'a mut Mapping, path: &str) -> &'a mut Mapping {
    path::segments(path).fold(root, |current, segment| {
        current
            .get_or_insert_with(segment, || Node::Mapping(Mapping::new()))
            .make_mapping()
    })
}

fn collect_keys(
    mapping: &Mapping,
    prefix: Option<&str>,
    deep: bool,
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
) {
    for (key, value) in mapping.iter() {
        let full = match prefix {
            Some(prefix) => format!("{prefix}{}{key}", path::SEPARATOR),
            None => key.to_string(),
        };
        if seen.insert(full.clone()) {
            out.push(full.clone());
        }
        if deep && let Some(child) = value.as_mapping() {
            collect_keys(child, Some(&full), deep, seen, out);
        }
    }
}

/// Read access to a configuration mapping.
pub trait ConfigurationSection {
    /// The mapping this section is bound to.
    fn mapping(&self) -> &Mapping;

    /// Returns the node stored at `path`, or `None` if any segment is missing.
    fn get(&self, path: &str) -> Option<&Node> {
        lookup(self.mapping(), path)
    }

    /// Returns the value at `path` converted to `T`.
    ///
    /// `None` covers both a missing value and a failed conversion.
    fn get_as<T: FromNode>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(T::from_node)
    }

    /// Returns the value at `path` converted to `T`, or `default`.
    fn get_or<T: FromNode>(&self, path: &str, default: T) -> T {
        self.get_as(path).unwrap_or(default)
    }

    fn get_string(&self, path: &str) -> Option<String> {
        self.get_as(path)
    }

    fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_as(path)
    }

    fn get_int(&self, path: &str) -> Option<i64> {
        self.get_as(path)
    }

    fn get_float(&self, path: &str) -> Option<f64> {
        self.get_as(path)
    }

    fn get_string_list(&self, path: &str) -> Option<Vec<String>> {
        self.get_as(path)
    }

    /// True if `path` resolves to a stored value, including an explicit null.
    fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Lists keys of this section in document order.
    ///
    /// With `deep`, nested mappings contribute compound paths (`a.b`) after
    /// their parent key. Paths to mappings are listed as well as leaf paths.
    fn keys(&self, deep: bool) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        collect_keys(self.mapping(), None, deep, &mut seen, &mut out);
        out
    }

    /// Read-only view of the mapping at `path`. An empty path returns this
    /// section itself.
    fn section(&self, path: &str) -> Option<Section<'_>> {
        if path.is_empty() {
            return Some(Section::new("", self.mapping()));
        }
        let (_, name) = path::split_last(path);
        let mapping = self.get(path)?.as_mapping()?;
        Some(Section::new(name, mapping))
    }
}

/// Write access to a configuration mapping.
pub trait ConfigurationSectionMut: ConfigurationSection {
    fn mapping_mut(&mut self) -> &mut Mapping;

    /// Stores `value` at `path`, creating intermediate mappings as needed.
    ///
    /// Any non-mapping value found along the way is replaced by a mapping.
    fn set(&mut self, path: &str, value: impl Into<Node>) {
        let (parent, key) = path::split_last(path);
        let root = self.mapping_mut();
        let container = match parent {
            Some(parent) => mapping_at_mut(root, parent),
            None => root,
        };
        container.insert(key, value);
    }

    /// Removes and returns the value at `path`. Missing paths are a no-op.
    fn remove(&mut self, path: &str) -> Option<Node> {
        let (parent, key) = path::split_last(path);
        let root = self.mapping_mut();
        let container = match parent {
            Some(parent) => path::segments(parent).try_fold(root, |current, segment| {
                current.get_mut(segment)?.as_mapping_mut()
            })?,
            None => root,
        };
        container.remove(key)
    }

    /// Mutable view of the mapping at `path`, created if absent.
    ///
    /// A non-mapping value at `path` is replaced by an empty mapping so the
    /// returned section can always be written to. An empty path returns this
    /// section itself.
    fn section_mut(&mut self, path: &str) -> SectionMut<'_> {
        if path.is_empty() {
            return SectionMut::new("", self.mapping_mut());
        }
        let (_, name) = path::split_last(path);
        SectionMut::new(name, mapping_at_mut(self.mapping_mut(), path))
    }

    /// Removes every entry of this section.
    fn clear(&mut self) {
        self.mapping_mut().clear();
    }
}

/// A section that owns its mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySection {
    mapping: Mapping,
}

impl MemorySection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_mapping(self) -> Mapping {
        self.mapping
    }
}

impl From<Mapping> for MemorySection {
    fn from(mapping: Mapping) -> Self {
        Self { mapping }
    }
}

impl ConfigurationSection for MemorySection {
    fn mapping(&self) -> &Mapping {
        &self.mapping
    }
}

impl ConfigurationSectionMut for MemorySection {
    fn mapping_mut(&mut self) -> &mut Mapping {
        &mut self.mapping
    }
}

/// Read-only view into a mapping owned elsewhere.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    name: String,
    mapping: &'a Mapping,
}

impl<'a> Section<'a> {
    fn new(name: &str, mapping: &'a Mapping) -> Self {
        Self {
            name: name.to_string(),
            mapping,
        }
    }

    /// The final path segment used to reach this view; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ConfigurationSection for Section<'_> {
    fn mapping(&self) -> &Mapping {
        self.mapping
    }
}

/// Mutable view into a mapping owned elsewhere.
#[derive(Debug)]
pub struct SectionMut<'a> {
    name: String,
    mapping: &'a mut Mapping,
}

impl<'a> SectionMut<'a> {
    fn new(name: &str, mapping: &'a mut Mapping) -> Self {
        Self {
            name: name.to_string(),
            mapping,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ConfigurationSection for SectionMut<'_> {
    fn mapping(&self) -> &Mapping {
        self.mapping
    }
}

impl ConfigurationSectionMut for SectionMut<'_> {
    fn mapping_mut(&mut self) -> &mut Mapping {
        self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::conformance;

    #[test]
    fn test_memory_section_conformance() {
        conformance::run_all(MemorySection::new);
    }

    #[test]
    fn test_get_through_scalar_is_absent() {
        let mut section = MemorySection::new();
        section.set("a", "scalar");
        assert_eq!(section.get("a.b"), None);
        assert!(!section.contains("a.b.c"));
    }

    #[test]
    fn test_section_outlives_path_argument() {
        let mut section = MemorySection::new();
        section.set("a.b.c", 1);

        let view = {
            let path = String::from("a.b");
            section.section(&path)
        };

        let view = view.expect("'a.b' is a mapping");
        assert_eq!(view.name(), "b");
        assert_eq!(view.get_int("c"), Some(1));
    }

    #[test]
    fn test_remove_does_not_create_intermediates() {
        let mut section = MemorySection::new();
        assert_eq!(section.remove("missing.child"), None);
        assert!(section.mapping().is_empty());
    }

    #[test]
    fn test_remove_nested() {
        let mut section = MemorySection::new();
        section.set("a.b", 1);
        section.set("a.c", 2);
        assert_eq!(section.remove("a.b"), Some(Node::Integer(1)));
        assert_eq!(section.keys(true), vec!["a", "a.c"]);
    }

    #[test]
    fn test_section_mut_writes_through_to_parent() {
        let mut root = MemorySection::new();
        {
            let mut database = root.section_mut("storage.database");
            assert_eq!(database.name(), "database");
            database.set("host", "localhost");
            database.set("pool.size", 4);
        }
        assert_eq!(
            root.get_string("storage.database.host").as_deref(),
            Some("localhost")
        );
        assert_eq!(root.get_int("storage.database.pool.size"), Some(4));
    }

    #[test]
    fn test_section_mut_replaces_scalar() {
        let mut root = MemorySection::new();
        root.set("server", 8080);
        root.section_mut("server").set("port", 8080);
        assert_eq!(root.get_int("server.port"), Some(8080));
        assert!(root.get("server").is_some_and(Node::is_mapping));
    }

    #[test]
    fn test_section_read_only_navigation() {
        let mut root = MemorySection::new();
        root.set("a.b.c", true);

        let b = root.section("a.b").unwrap();
        assert_eq!(b.name(), "b");
        assert_eq!(b.get_bool("c"), Some(true));
        assert!(root.section("a.b.c").is_none());
        assert!(root.section("missing").is_none());
        assert_eq!(root.section("").unwrap().keys(false), vec!["a"]);
    }

    #[test]
    fn test_keys_shallow_and_deep() {
        let mut root = MemorySection::new();
        root.set("name", "app");
        root.set("server.host", "0.0.0.0");
        root.set("server.tls.enabled", false);
        root.set("tags", vec!["x", "y"]);

        assert_eq!(root.keys(false), vec!["name", "server", "tags"]);
        assert_eq!(
            root.keys(true),
            vec![
                "name",
                "server",
                "server.host",
                "server.tls",
                "server.tls.enabled",
                "tags"
            ]
        );
    }

    #[test]
    fn test_keys_deduplicates_dotted_literal_keys() {
        let mut mapping = Mapping::new();
        mapping.insert("a.b", 1);
        let mut child = Mapping::new();
        child.insert("b", 2);
        mapping.insert("a", child);

        let section = MemorySection::from(mapping);
        assert_eq!(section.keys(true), vec!["a.b", "a"]);
    }

    #[test]
    fn test_get_or_falls_back_on_wrong_type() {
        let mut root = MemorySection::new();
        root.set("port", "not-a-number");
        assert_eq!(root.get_or("port", 8080u16), 8080);
        assert_eq!(root.get_or("missing", 1.5f64), 1.5);
        root.set("port", "9090");
        assert_eq!(root.get_or("port", 8080u16), 9090);
    }

    #[test]
    fn test_explicit_null_is_contained() {
        let mut root = MemorySection::new();
        root.set("nothing", Node::Null);
        assert!(root.contains("nothing"));
        assert_eq!(root.get_string("nothing"), None);
    }

    #[test]
    fn test_clear() {
        let mut root = MemorySection::new();
        root.set("a.b", 1);
        root.section_mut("a").clear();
        assert_eq!(root.keys(true), vec!["a"]);
        root.clear();
        assert!(root.keys(false).is_empty());
    }
}
