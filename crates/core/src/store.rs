//! Key-value store trait — persistent storage for raw thesaurus documents.
//!
//! Keys are already normalized by the caller (see `synonymizer-cache`).
//! Values are the raw documents, stored verbatim.
//!
//! Implementations: file-per-key directory, in-memory (for testing).

use async_trait::async_trait;
use crate::error::CacheError;

/// The core KeyValueStore trait.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> std::result::Result<(), CacheError>;

    /// Number of stored entries.
    async fn len(&self) -> std::result::Result<usize, CacheError>;

    async fn is_empty(&self) -> std::result::Result<bool, CacheError> {
        Ok(self.len().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStore(usize);

    #[async_trait]
    impl KeyValueStore for FixedStore {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn get(&self, _key: &str) -> std::result::Result<Option<String>, CacheError> {
            Ok(None)
        }

        async fn put(&self, _key: &str, _value: &str) -> std::result::Result<(), CacheError> {
            Ok(())
        }

        async fn len(&self) -> std::result::Result<usize, CacheError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn is_empty_follows_len() {
        assert!(FixedStore(0).is_empty().await.unwrap());
        assert!(!FixedStore(3).is_empty().await.unwrap());
    }
}
