//! Hierarchical, path-addressed configuration store.
//!
//! This crate provides an in-memory tree of nested mappings addressed by
//! dot-separated paths (`server.tls.enabled`), and a file-backed wrapper that
//! loads the tree from a YAML or JSON file, seeds missing files from bundled
//! defaults, and saves it back.
//!
//! ```no_run
//! use nestcfg::{ConfigurationSection, ConfigurationSectionMut, FileConfiguration};
//!
//! let mut config = FileConfiguration::new("config/app.yml");
//! config.load()?;
//! let port = config.get_or("server.port", 8080u16);
//! config.set("server.port", port);
//! config.save()?;
//! # Ok::<(), nestcfg::ConfigError>(())
//! ```

pub mod codec;
mod error;
mod file;
pub mod node;
pub mod path;
mod resource;
mod section;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use codec::{Codec, CodecError, FlowStyle, JsonCodec, YamlCodec};
pub use error::{ConfigError, Result};
pub use file::FileConfiguration;
pub use node::{FromNode, Mapping, Node};
pub use resource::{DirectoryResources, EmbeddedResources, NoResources, ResourceSource};
pub use section::{
    ConfigurationSection, ConfigurationSectionMut, MemorySection, Section, SectionMut,
};
