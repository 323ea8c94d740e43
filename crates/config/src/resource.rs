//! Sources of bundled default documents.
//!
//! A default resource is read once, when `FileConfiguration::load` has to
//! create a missing file, and its bytes are copied into that file verbatim.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolves a resource identifier to the bytes of a default document.
pub trait ResourceSource: fmt::Debug + Send + Sync {
    /// Returns the resource bytes. A missing resource is reported as
    /// `io::ErrorKind::NotFound`.
    fn open(&self, id: &str) -> io::Result<Vec<u8>>;
}

fn not_found(id: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("resource '{id}' not found"))
}

/// A source with no resources at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceSource for NoResources {
    fn open(&self, id: &str) -> io::Result<Vec<u8>> {
        Err(not_found(id))
    }
}

/// Resources stored as files under a root directory.
///
/// Identifiers are relative paths; identifiers that are absolute or climb out
/// of the root with `..` are rejected.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for DirectoryResources {
    fn open(&self, id: &str) -> io::Result<Vec<u8>> {
        let relative = Path::new(id);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if id.is_empty() || !contained {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("resource id '{id}' must be a relative path inside the resource root"),
            ));
        }
        std::fs::read(self.root.join(relative))
    }
}

/// Resources compiled into the binary, usually with `include_bytes!`.
///
/// ```
/// use nestcfg::EmbeddedResources;
///
/// static DEFAULTS: EmbeddedResources =
///     EmbeddedResources::new(&[("config.yml", b"greeting: hello\n")]);
/// ```
#[derive(Clone, Copy)]
pub struct EmbeddedResources {
    entries: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedResources {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }
}

impl fmt::Debug for EmbeddedResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}

impl ResourceSource for EmbeddedResources {
    fn open(&self, id: &str) -> io::Result<Vec<u8>> {
        self.entries
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, bytes)| bytes.to_vec())
            .ok_or_else(|| not_found(id))
    }
}
