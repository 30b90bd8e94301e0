//! In-memory cache backend
//!
//! Lock-free map, suitable for tests and for hosts whose process outlives
//! the refresh schedule. Durability across process restarts requires
//! [`crate::cache::FileBackend`].

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::cache::CacheBackend;

/// DashMap-backed bytes KV
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the backend holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn put(&self, key: &str, payload: Vec<u8>) -> Result<()> {
        self.entries.insert(key.to_string(), payload);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }
}
