//! In-memory store: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use synonymizer_core::error::CacheError;
use synonymizer_core::store::KeyValueStore;
use tokio::sync::RwLock;

/// A store that keeps documents in a HashMap.
/// Useful for testing and sessions where persistence isn't needed.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with `(key, document)` pairs.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    fn name(&self) -> &str { "in_memory" }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn len(&self) -> Result<usize, CacheError> {
        Ok(self.entries.read().await.len())
    }
}
