//! In-memory storage backend

use std::collections::HashMap;

use serde_json::Value;

use crate::Result;

use super::StoreBackend;

/// A backend holding the store document in a plain map.
///
/// Used by tests and demos, and as the ephemeral store of the CLI when no
/// store file is configured. Contents vanish with the worker thread.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, Value>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
