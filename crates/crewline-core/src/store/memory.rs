//! In-memory key-value storage for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValue;
use crate::error::Result;

/// Non-durable key-value store backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryKeyValue {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys; useful for retention assertions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValue for MemoryKeyValue {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}
