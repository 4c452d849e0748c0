//! File-per-key store — one JSON document per cached word.
//!
//! Storage location: `<cache_dir>/<key>.json`, `./thesaurus_cache` by default.
//!
//! Each value is written whole to a temporary sibling and renamed into
//! place, so a concurrent reader sees either the old file or the new one.
//! Concurrent writers to the same key are not coordinated; they write the
//! same document.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use synonymizer_core::error::CacheError;
use synonymizer_core::store::KeyValueStore;
use tracing::debug;

use crate::bootstrap::META_FILE;

/// A directory of `<key>.json` files.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

/// Whether a directory entry name is a cached document (not metadata).
pub(crate) fn is_entry_file(name: &str) -> bool {
    name.ends_with(".json") && name != META_FILE
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => {
                debug!(key, "Cache hit");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let io_err = |e: std::io::Error| CacheError::Io {
            key: key.to_string(),
            reason: e.to_string(),
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;

        let target = self.path_for(key);
        let tmp = self
            .dir
            .join(format!(".{key}.json.{}.tmp", std::process::id()));

        tokio::fs::write(&tmp, value).await.map_err(io_err)?;
        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(e));
        }

        debug!(key, path = %target.display(), "Cached thesaurus document");
        Ok(())
    }

    async fn len(&self) -> Result<usize, CacheError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(CacheError::Io {
                    key: String::new(),
                    reason: e.to_string(),
                });
            }
        };

        let mut count = 0;
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry.file_name().to_str().is_some_and(is_entry_file) {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn put_then_get_persists() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("cache"));

        store.put("quick", r#"[{"fl":"adjective"}]"#).await.unwrap();

        // A fresh store over the same directory sees the entry
        let reopened = FileStore::new(tmp.path().join("cache"));
        let value = reopened.get("quick").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"[{"fl":"adjective"}]"#));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_directory_is_empty() {
        let store = FileStore::new("/tmp/synonymizer_test_nonexistent_cache_dir");
        assert_eq!(store.len().await.unwrap(), 0);
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn put_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("cache");
        let store = FileStore::new(&dir);
        store.put("fox", "[]").await.unwrap();
        assert!(dir.join("fox.json").exists());
    }

    #[tokio::test]
    async fn len_ignores_meta_and_temp_files() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.put("a", "[]").await.unwrap();
        store.put("b", "[]").await.unwrap();
        std::fs::write(tmp.path().join(META_FILE), "{}").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn put_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store.put("a", "[1]").await.unwrap();
        store.put("a", "[2]").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.len().await.unwrap(), 1);
    }
}
