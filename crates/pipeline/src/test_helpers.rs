//! Shared mock providers for pipeline tests.

use synonymizer_core::error::ProviderError;
use synonymizer_core::provider::{TaggedWord, Tagger, ThesaurusSource};
use synonymizer_core::token::Token;
use std::collections::HashMap;
use std::sync::Mutex;

/// A tagger that replays scripted responses in order.
///
/// Once the script is exhausted every further call fails with a network
/// error, so tests can check the breaker without counting exactly.
pub struct ScriptedTagger {
    responses: Mutex<Vec<Result<Vec<TaggedWord>, ProviderError>>>,
    call_count: Mutex<usize>,
}

impl ScriptedTagger {
    pub fn new(responses: Vec<Result<Vec<TaggedWord>, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
        }
    }

    /// A tagger whose every call fails.
    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Tagger for ScriptedTagger {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn tag(&self, _text: &str, _tokens: &[Token]) -> Result<Vec<TaggedWord>, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        let out = responses
            .get(*count)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::Network("connection refused".into())));
        *count += 1;
        out
    }
}

/// A thesaurus that serves canned documents and counts fetches per word.
#[derive(Default)]
pub struct CannedThesaurus {
    documents: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl CannedThesaurus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, word: &str, body: &str) -> Self {
        self.documents.insert(word.to_string(), body.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, word: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|w| *w == word).count()
    }
}

#[async_trait::async_trait]
impl ThesaurusSource for CannedThesaurus {
    fn name(&self) -> &str {
        "canned"
    }

    async fn fetch(&self, word: &str) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(word.to_string());
        self.documents
            .get(word)
            .cloned()
            .ok_or(ProviderError::ApiError {
                status_code: 404,
                message: format!("no document for '{word}'"),
            })
    }
}

/// A one-sense thesaurus document.
pub fn document(label: &str, synonyms: &[&str]) -> String {
    let syns: Vec<String> = synonyms.iter().map(|s| format!("\"{s}\"")).collect();
    format!(r#"[{{"fl":"{label}","meta":{{"syns":[[{}]]}}}}]"#, syns.join(","))
}
