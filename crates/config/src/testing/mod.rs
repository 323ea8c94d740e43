//! Testing utilities for configuration sections.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use nestcfg::MemorySection;
//! use nestcfg::testing::conformance;
//!
//! // Exercise the section contract against any implementation
//! conformance::run_all(MemorySection::new);
//! ```

pub mod conformance;
pub mod generators;

use crate::node::{Mapping, Node};

/// Builds a mapping from `(key, value)` pairs, for terse test fixtures.
pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Mapping
where
    K: Into<String>,
    V: Into<Node>,
{
    entries.into_iter().collect()
}
