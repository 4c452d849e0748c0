//! Remote provider traits: the abstraction over network dependencies.
//!
//! A [`Tagger`] assigns grammatical roles to a token list using an external
//! model. A [`ThesaurusSource`] fetches the raw thesaurus document for a word.
//! Both are optional: the pipeline degrades to local heuristics and to
//! "no entry" when they are absent or failing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;
use crate::token::{Token, NEWLINE_MARKER};

/// One `[word, category]` pair as returned by a remote tagger.
///
/// `label` is `None` when the tagger returned a bare word without a
/// category; the classifier fills those in locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub word: String,
    pub label: Option<String>,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            label: Some(label.into()),
        }
    }

    pub fn bare(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            label: None,
        }
    }

    /// Whether the tagger echoed a line break in this position.
    pub fn is_newline(&self) -> bool {
        self.word == "\n" || self.word == NEWLINE_MARKER
    }
}

/// How the thesaurus credential was obtained.
///
/// `CachePresent` is a sentinel: a previous session left cached documents
/// behind, so the cache is worth consulting, but there is no real key and
/// remote fetches stay disabled.
#[derive(Clone, PartialEq, Eq)]
pub enum ThesaurusCredential {
    Key(String),
    CachePresent,
}

impl ThesaurusCredential {
    /// The real key, if any. The sentinel never yields one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            Self::CachePresent => None,
        }
    }
}

impl std::fmt::Debug for ThesaurusCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(_) => f.write_str("Key([REDACTED])"),
            Self::CachePresent => f.write_str("CachePresent"),
        }
    }
}

/// The core Tagger trait.
#[async_trait]
pub trait Tagger: Send + Sync {
    /// A human-readable name for this tagger (e.g., "gemini").
    fn name(&self) -> &str;

    /// Tag every token of `text`, in order.
    ///
    /// Implementations return whatever the remote produced; alignment with
    /// `tokens` is checked by the caller.
    async fn tag(
        &self,
        text: &str,
        tokens: &[Token],
    ) -> std::result::Result<Vec<TaggedWord>, ProviderError>;
}

/// The core ThesaurusSource trait.
#[async_trait]
pub trait ThesaurusSource: Send + Sync {
    /// A human-readable name for this source.
    fn name(&self) -> &str;

    /// Fetch the raw thesaurus document for `word`.
    ///
    /// The body is returned verbatim so it can be cached byte-for-byte.
    async fn fetch(&self, word: &str) -> std::result::Result<String, ProviderError>;
}
