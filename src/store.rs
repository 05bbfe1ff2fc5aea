//! File-per-resource JSON persistence for snapshots and reference data.
//!
//! Each resource is one pretty-printed JSON file under the store root.
//! Writes go to a temp file in the same directory and are renamed over the
//! destination, so an interrupted write never leaves a corrupt or partial
//! file behind.

use crate::error::{EtlError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads and writes JSON resource files keyed by file name.
pub struct ResourceStore {
    root: PathBuf,
}

impl ResourceStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a resource file.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Read a resource as loosely-typed JSON.
    pub fn read(&self, name: &str) -> Result<serde_json::Value> {
        self.read_as(name)
    }

    /// Read and deserialize a resource.
    pub fn read_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let contents = fs::read_to_string(self.path_for(name))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Serialize `data` as pretty JSON (2-space indent, non-ASCII characters
    /// kept literal) and atomically replace the resource file.
    pub fn write<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<()> {
        let dest = self.path_for(name);
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        serde_json::to_writer_pretty(&mut tmp, data)?;
        tmp.persist(&dest).map_err(|e| EtlError::Io(e.error))?;
        Ok(())
    }
}
