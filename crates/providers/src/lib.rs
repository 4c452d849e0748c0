//! Remote provider implementations for Synonymizer.
//!
//! The tagger implements `synonymizer_core::Tagger`, the thesaurus client
//! implements `synonymizer_core::ThesaurusSource`. The router builds whichever
//! of them the configuration enables.

pub mod gemini;
pub mod redact;
pub mod router;
pub mod thesaurus;

pub use gemini::{GeminiTagger, parse_tagger_output};
pub use redact::{mask_query_key, mask_secret};
pub use router::{ProviderSet, build_from_config};
pub use thesaurus::{HttpThesaurus, build_url};
