//! Thesaurus resolution: cache first, then the remote source.
//!
//! Nothing here returns an error. A cache that cannot be read or holds a
//! corrupt document is treated as a miss; a remote failure yields no entry
//! and leaves the cache untouched.

use std::sync::Arc;
use synonymizer_cache::cache_key;
use synonymizer_core::error::CacheError;
use synonymizer_core::provider::ThesaurusSource;
use synonymizer_core::store::KeyValueStore;
use synonymizer_core::thesaurus::ThesaurusEntry;
use tracing::{debug, warn};

/// How far a lookup may go on a cache miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Store only; never touch the network.
    CacheOnly,
    /// Fetch misses from the remote source, if there is one.
    Remote,
}

#[derive(Clone)]
pub struct ThesaurusResolver {
    store: Arc<dyn KeyValueStore>,
    source: Option<Arc<dyn ThesaurusSource>>,
}

impl ThesaurusResolver {
    /// A resolver that only reads `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            source: None,
        }
    }

    /// Fetch misses from `source` and persist them into the store.
    pub fn with_source(mut self, source: Arc<dyn ThesaurusSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn can_fetch(&self) -> bool {
        self.source.is_some()
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Look up the thesaurus entry for `word`, fetching on a miss.
    pub async fn resolve(&self, word: &str) -> Option<ThesaurusEntry> {
        self.lookup(word, Lookup::Remote).await
    }

    pub async fn lookup(&self, word: &str, mode: Lookup) -> Option<ThesaurusEntry> {
        if word.trim().is_empty() {
            return None;
        }

        let key = cache_key(word);
        if key.is_empty() {
            return None;
        }

        match self.store.get(&key).await {
            Ok(Some(raw)) => match ThesaurusEntry::parse(&raw) {
                Ok(entry) => return Some(entry),
                Err(reason) => {
                    let error = CacheError::Corrupt {
                        key: key.clone(),
                        reason,
                    };
                    warn!(error = %error, "Ignoring cache entry");
                }
            },
            Ok(None) => debug!(key = %key, "Cache miss"),
            Err(e) => warn!(key = %key, error = %e, "Cache read failed"),
        }

        if mode == Lookup::CacheOnly {
            return None;
        }
        let source = self.source.as_ref()?;

        let raw = match source.fetch(word).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(source = source.name(), word, error = %e, "Thesaurus fetch failed");
                return None;
            }
        };

        let entry = match ThesaurusEntry::parse(&raw) {
            Ok(entry) => entry,
            Err(reason) => {
                warn!(word, reason = %reason, "Thesaurus returned an unusable document");
                return None;
            }
        };

        if let Err(e) = self.store.put(&key, &raw).await {
            warn!(key = %key, error = %e, "Failed to cache thesaurus document");
        }

        Some(entry)
    }
}
