//! Thesaurus cache implementations for Synonymizer.

pub mod bootstrap;
pub mod file_store;
pub mod in_memory;
pub mod key;

pub use bootstrap::{CacheMeta, META_FILE, bootstrap_credential};
pub use file_store::FileStore;
pub use in_memory::InMemoryStore;
pub use key::{MAX_KEY_LEN, cache_key};
