//! Result cache: last-known-good metrics with lazy expiration
//!
//! A single-slot fallback, not a general store: one entry under a fixed
//! logical key, written on every successful fetch, read only when the retry
//! budget is exhausted. Entries carry their own expiry instant and are
//! checked lazily at read time - with one small entry there is nothing to
//! evict in the background.
//!
//! The byte-level backend is a general-purpose KV ([`CacheBackend`]);
//! serialization of `{metrics, expiry}` entries is this module's job.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::MetricSet;

/// Current timestamp in milliseconds since the Unix epoch
#[inline]
#[must_use]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Durable bytes KV contract for cache storage
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Store a payload, overwriting any prior entry under the key
    async fn put(&self, key: &str, payload: Vec<u8>) -> Result<()>;

    /// Load the payload under the key, if present
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Serialized cache entry: the metric set plus its expiry instant
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    metrics: MetricSet,
    expiry_millis: u64,
}

/// Metric-set cache over an arbitrary byte backend
///
/// Writes are advisory: a failed write is logged and swallowed, since the
/// cache only ever improves a degraded outcome. Reads treat decode failures
/// and expired entries as absence.
#[derive(Clone)]
pub struct ResultCache {
    backend: Arc<dyn CacheBackend>,
}

impl ResultCache {
    /// Create a cache over the given backend
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    /// Store a metric set with an absolute expiry instant
    ///
    /// Best-effort: backend failures are logged at warn and swallowed.
    pub async fn put(&self, key: &str, metrics: &MetricSet, expiry_millis: u64) {
        let entry = CacheEntry {
            metrics: metrics.clone(),
            expiry_millis,
        };
        let payload = match serde_json::to_vec(&entry) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize cache entry");
                return;
            }
        };
        if let Err(e) = self.backend.put(key, payload).await {
            warn!(key, error = %e, "cache write failed, continuing without cache");
        }
    }

    /// Load the metric set under the key, honoring expiry at read time
    ///
    /// Returns `None` when the key is absent, the payload does not decode to
    /// a valid complete set, or the entry has expired as of `now_millis`.
    pub async fn get(&self, key: &str, now_millis: u64) -> Option<MetricSet> {
        let payload = match self.backend.get(key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_slice(&payload) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "cache entry did not decode, treating as miss");
                return None;
            }
        };

        if now_millis >= entry.expiry_millis {
            debug!(key, expiry = entry.expiry_millis, "cache entry expired");
            return None;
        }

        Some(entry.metrics)
    }
}
