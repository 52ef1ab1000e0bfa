//! File-backed storage backend
//!
//! The whole store is one JSON document on disk. Every mutation rewrites the
//! document through a temp file followed by a rename, so a write either
//! lands completely or not at all; readers never observe a half-written
//! document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::{Error, Result};

use super::StoreBackend;

/// A backend persisting the store document to a single JSON file.
pub struct JsonFileBackend {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl JsonFileBackend {
    /// Open the store at `path`, loading the existing document if one is
    /// present. A missing file is an empty store, not an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no store file at {}; starting empty", path.display());
                Map::new()
            }
            Err(err) => {
                return Err(Error::Storage(format!(
                    "cannot read '{}': {err}",
                    path.display()
                )))
            }
        };
        Ok(Self { path, doc })
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.doc)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Storage(format!("cannot create store dir: {e}")))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| Error::Storage(format!("cannot write '{}': {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::Storage(format!("cannot replace '{}': {e}", self.path.display())))
    }
}

impl StoreBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.doc.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.doc.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.doc.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}
