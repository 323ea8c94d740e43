//! File-backed configuration.
//!
//! Responsibilities:
//! - Bind a root mapping to one file on disk.
//! - Create missing parent directories and the file itself on first load,
//!   seeding it from a default resource when one is configured.
//! - Decode on `load`, encode on `save`.
//!
//! Does NOT handle:
//! - File locking or detection of concurrent writers; the last writer wins.
//! - Merging on load. Each successful load replaces all in-memory state.
//!
//! Invariants:
//! - A failed `load` leaves the in-memory tree untouched.
//! - `save` never modifies the in-memory tree.
//! - Writes, including the initial seed, go to a hidden sibling temporary
//!   file that is renamed over the target, so a failed write never leaves a
//!   partial file behind.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::codec::{Codec, FlowStyle, JsonCodec, YamlCodec};
use crate::error::{ConfigError, Result};
use crate::node::{Mapping, Node};
use crate::resource::{NoResources, ResourceSource};
use crate::section::{ConfigurationSection, ConfigurationSectionMut};

/// A configuration section persisted to a single file.
#[derive(Debug)]
pub struct FileConfiguration<C = YamlCodec> {
    path: PathBuf,
    resource_path: Option<String>,
    resources: Box<dyn ResourceSource>,
    codec: C,
    style: FlowStyle,
    root: Mapping,
    loaded: bool,
}

impl FileConfiguration<YamlCodec> {
    /// Creates an unloaded YAML configuration for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_codec(path, YamlCodec)
    }

    /// Creates an unloaded YAML configuration for `relative` inside `folder`.
    pub fn in_folder(folder: impl AsRef<Path>, relative: impl AsRef<Path>) -> Self {
        Self::new(folder.as_ref().join(relative))
    }
}

impl FileConfiguration<JsonCodec> {
    /// Creates an unloaded JSON configuration for `path`.
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::with_codec(path, JsonCodec)
    }
}

impl<C: Codec> FileConfiguration<C> {
    /// Creates an unloaded configuration for `path` using `codec`.
    ///
    /// Relative paths are resolved against the current directory now, so a
    /// later change of directory does not move the file.
    pub fn with_codec(path: impl Into<PathBuf>, codec: C) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        Self {
            path,
            resource_path: None,
            resources: Box::new(NoResources),
            codec,
            style: FlowStyle::Block,
            root: Mapping::new(),
            loaded: false,
        }
    }

    /// Sets where default resources are looked up.
    pub fn with_resources(mut self, resources: impl ResourceSource + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    /// Sets the container style used by `save`. Defaults to `FlowStyle::Block`.
    pub fn with_flow_style(mut self, style: FlowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn absolute_path(&self) -> &Path {
        &self.path
    }

    /// The file this configuration is bound to, as an owned path.
    pub fn file(&self) -> PathBuf {
        self.path.clone()
    }

    pub fn resource_path(&self) -> Option<&str> {
        self.resource_path.as_deref()
    }

    /// Names the default resource copied into the file when `load` has to
    /// create it. Performs no I/O.
    pub fn set_resource_path(&mut self, id: impl Into<String>) -> &mut Self {
        self.resource_path = Some(id.into());
        self
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// True once a `load` has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the file into memory, creating it (and its directories) first
    /// if it does not exist.
    ///
    /// # Errors
    /// Returns an error if a directory or the file cannot be created, the
    /// default resource cannot be read, or the file cannot be read or decoded
    /// into a mapping. The in-memory tree is left as it was.
    pub fn load(&mut self) -> Result<()> {
        match self.read_root() {
            Ok(root) => {
                self.root = root;
                self.loaded = true;
                tracing::debug!(
                    path = %self.path.display(),
                    codec = self.codec.name(),
                    keys = self.root.len(),
                    "Configuration loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to load configuration"
                );
                Err(e)
            }
        }
    }

    fn read_root(&self) -> Result<Mapping> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if !self.path.exists() {
            self.create_file()?;
        }

        let bytes = fs::read(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        match self.codec.decode(&bytes) {
            Ok(Node::Null) => Ok(Mapping::new()),
            Ok(Node::Mapping(mapping)) => Ok(mapping),
            Ok(other) => Err(ConfigError::NotAMapping {
                path: self.path.clone(),
                found: other.type_name(),
            }),
            Err(source) => Err(ConfigError::Decode {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn create_file(&self) -> Result<()> {
        let contents: Cow<'_, [u8]> = match &self.resource_path {
            Some(id) => Cow::Owned(self.resources.open(id).map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    ConfigError::ResourceNotFound { id: id.clone() }
                } else {
                    ConfigError::Resource {
                        id: id.clone(),
                        source,
                    }
                }
            })?),
            None => Cow::Borrowed(self.codec.empty_document()),
        };

        self.write_atomically(&contents)
            .map_err(|source| ConfigError::CreateFile {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            resource = self.resource_path.as_deref(),
            "Created configuration file"
        );
        Ok(())
    }

    /// Writes the in-memory tree to the file.
    ///
    /// # Errors
    /// Returns an error if the tree cannot be encoded or the file cannot be
    /// written.
    pub fn save(&self) -> Result<()> {
        self.write_root().inspect_err(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to save configuration"
            );
        })
    }

    fn write_root(&self) -> Result<()> {
        let bytes = self
            .codec
            .encode(&self.root, self.style)
            .map_err(|source| ConfigError::Encode {
                path: self.path.clone(),
                source,
            })?;

        let write_error = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        self.write_atomically(&bytes).map_err(write_error)?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "Configuration saved atomically"
        );
        Ok(())
    }

    /// Writes `bytes` to the temporary sibling, then renames it over the
    /// file. The temporary file is removed on failure.
    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        let temp_path = self.temp_path();
        let result = fs::write(&temp_path, bytes).and_then(|()| fs::rename(&temp_path, &self.path));
        if result.is_err() && temp_path.is_file() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// `.<name>.nestcfg-tmp` next to the file.
    fn temp_path(&self) -> PathBuf {
        let mut name = std::ffi::OsString::from(".");
        if let Some(file_name) = self.path.file_name() {
            name.push(file_name);
        }
        name.push(".nestcfg-tmp");
        self.path.with_file_name(name)
    }
}

impl<C> ConfigurationSection for FileConfiguration<C> {
    fn mapping(&self) -> &Mapping {
        &self.root
    }
}

impl<C> ConfigurationSectionMut for FileConfiguration<C> {
    fn mapping_mut(&mut self) -> &mut Mapping {
        &mut self.root
    }
}
