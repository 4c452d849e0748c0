//! # Synonymizer Core
//!
//! Domain types, traits, and error definitions for the Synonymizer text
//! pipeline. This crate has **no I/O of its own**; it defines the model that
//! the other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external dependency of the pipeline (remote tagger, remote thesaurus,
//! cache storage) is a trait here. Implementations live in their respective
//! crates, so the pipeline can be exercised with in-memory fakes.

pub mod error;
pub mod token;
pub mod thesaurus;
pub mod store;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{CacheError, Error, ProviderError, Result};
pub use token::{Category, Token, TypedToken, NEWLINE_MARKER};
pub use thesaurus::{SenseRecord, ThesaurusEntry};
pub use store::KeyValueStore;
pub use provider::{TaggedWord, Tagger, ThesaurusCredential, ThesaurusSource};
