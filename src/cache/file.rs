//! Durable file-backed cache backend
//!
//! One file per key under a cache directory, written atomically via a
//! temp-file rename so a crash mid-write never leaves a truncated entry
//! for the next read to trip over.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use crate::cache::CacheBackend;

/// Filesystem-backed bytes KV
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at the given directory
    ///
    /// The directory is created on first write if it does not exist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache directory root
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are logical names like "widgets/overview". The encoding must
        // be injective so distinct keys never share a file: '_' introduces a
        // two-digit hex escape and is itself escaped, everything filename-safe
        // passes through ("widgets/overview" becomes "widgets_2foverview").
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' => {
                    file_name.push(byte as char);
                }
                _ => file_name.push_str(&format!("_{:02x}", byte)),
            }
        }
        file_name.push_str(".json");
        self.dir.join(file_name)
    }
}

#[async_trait]
impl CacheBackend for FileBackend {
    async fn put(&self, key: &str, payload: Vec<u8>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create cache dir {}", self.dir.display()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &payload)
            .await
            .with_context(|| format!("failed to write cache file {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("failed to move cache file into place at {}", path.display()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read cache file {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend
            .put("widgets/overview", b"payload".to_vec())
            .await
            .unwrap();
        assert_eq!(
            backend.get("widgets/overview").await.unwrap(),
            Some(b"payload".to_vec())
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.get("widgets/overview").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_key_separators_are_hex_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.put("widgets/overview", b"a".to_vec()).await.unwrap();
        assert!(dir.path().join("widgets_2foverview.json").exists());
    }

    #[tokio::test]
    async fn test_distinct_keys_never_collide() {
        // "a/b" and "a_b" would collide under naive flattening
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.put("a/b", b"slash".to_vec()).await.unwrap();
        backend.put("a_b", b"underscore".to_vec()).await.unwrap();

        assert_eq!(backend.get("a/b").await.unwrap(), Some(b"slash".to_vec()));
        assert_eq!(
            backend.get("a_b").await.unwrap(),
            Some(b"underscore".to_vec())
        );
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("cache");
        let backend = FileBackend::new(&nested);

        backend.put("k", b"v".to_vec()).await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_survives_backend_recreation() {
        // Durability: a fresh backend over the same directory sees the entry
        let dir = tempfile::tempdir().unwrap();
        FileBackend::new(dir.path())
            .put("k", b"persisted".to_vec())
            .await
            .unwrap();

        let reopened = FileBackend::new(dir.path());
        assert_eq!(
            reopened.get("k").await.unwrap(),
            Some(b"persisted".to_vec())
        );
    }
}
