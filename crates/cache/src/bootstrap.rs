//! Startup bootstrap: recover a thesaurus credential from the cache directory.
//!
//! Runs once, before any session exists, and only when the configuration
//! did not supply a key:
//! 1. `<cache_dir>/.meta.json` with a non-empty `thesaurus_key` wins.
//! 2. Otherwise, any cached `*.json` document yields the `CachePresent`
//!    sentinel: the cache is served, nothing new is fetched.
//! 3. Otherwise there is no credential.

use serde::{Deserialize, Serialize};
use std::path::Path;
use synonymizer_core::provider::ThesaurusCredential;
use tracing::{debug, info};

use crate::file_store::is_entry_file;

/// Name of the metadata file inside the cache directory.
pub const META_FILE: &str = ".meta.json";

/// Contents of `.meta.json`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CacheMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesaurus_key: Option<String>,
}

impl CacheMeta {
    /// Read `.meta.json` from `cache_dir`. Missing or malformed files yield `None`.
    pub fn load(cache_dir: &Path) -> Option<Self> {
        let path = cache_dir.join(META_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(meta) => Some(meta),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to read cache metadata");
                None
            }
        }
    }
}

/// Decide the thesaurus credential for this run.
pub fn bootstrap_credential(
    configured: Option<&str>,
    cache_dir: &Path,
) -> Option<ThesaurusCredential> {
    if let Some(key) = configured.filter(|k| !k.is_empty()) {
        return Some(ThesaurusCredential::Key(key.to_string()));
    }

    if !cache_dir.is_dir() {
        return None;
    }

    if let Some(key) = CacheMeta::load(cache_dir)
        .and_then(|m| m.thesaurus_key)
        .filter(|k| !k.is_empty())
    {
        info!("Using thesaurus key from cache metadata");
        return Some(ThesaurusCredential::Key(key));
    }

    let has_entries = match std::fs::read_dir(cache_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_str().is_some_and(is_entry_file)),
        Err(e) => {
            debug!(error = %e, "Error enumerating cache directory");
            false
        }
    };

    if has_entries {
        info!(dir = %cache_dir.display(), "Cached entries found; serving cache without remote lookups");
        Some(ThesaurusCredential::CachePresent)
    } else {
        None
    }
}
