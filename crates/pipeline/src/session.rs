//! The processing session: tokenize, classify, resolve and build.
//!
//! A session remembers the last submitted text and its typed tokens so that
//! [`Session::rebuild`] can draw a fresh set of synonyms without touching the
//! tagger again. Nothing here fails: every remote or cache problem degrades
//! to a fallback and is logged.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use synonymizer_core::provider::{Tagger, ThesaurusSource};
use synonymizer_core::store::KeyValueStore;
use synonymizer_core::token::{Token, TypedToken};
use tracing::debug;

use crate::breaker::BreakerState;
use crate::builder::build;
use crate::classifier::Classifier;
use crate::resolver::{Lookup, ThesaurusResolver};
use crate::tokenizer::tokenize;

/// Whether the session has something to rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Ready,
}

pub struct Session {
    classifier: Classifier,
    resolver: ThesaurusResolver,
    rng: StdRng,

    /// Trimmed text of the last non-empty submission.
    last_submitted_text: Option<String>,
    tokens: Vec<Token>,
    typed_tokens: Vec<TypedToken>,
    last_built_sentence: String,
}

impl Session {
    /// A session over `store` with no remote providers and an OS-seeded RNG.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            classifier: Classifier::heuristic(),
            resolver: ThesaurusResolver::new(store),
            rng: StdRng::from_os_rng(),
            last_submitted_text: None,
            tokens: Vec::new(),
            typed_tokens: Vec::new(),
            last_built_sentence: String::new(),
        }
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.classifier = self.classifier.with_tagger(tagger);
        self
    }

    pub fn with_thesaurus(mut self, source: Arc<dyn ThesaurusSource>) -> Self {
        self.resolver = self.resolver.with_source(source);
        self
    }

    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.classifier = self.classifier.with_failure_threshold(threshold);
        self
    }

    /// Make synonym choice reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Process new text and return the rebuilt sentence.
    ///
    /// Empty or whitespace-only text clears the session and returns `""`.
    pub async fn submit(&mut self, text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Empty submission; clearing session");
            self.clear();
            return String::new();
        }

        let tokens = tokenize(text);
        let typed = self.classifier.classify(&tokens, text).await;
        debug!(tokens = tokens.len(), "Classified submission");

        // Warm the cache so the build below is all hits where possible
        for word in tokens.iter().filter_map(Token::as_word) {
            let _ = self.resolver.resolve(word).await;
        }

        self.tokens = tokens;
        self.typed_tokens = typed;
        self.last_submitted_text = Some(trimmed.to_string());
        self.last_built_sentence = build(
            &self.typed_tokens,
            &self.resolver,
            Lookup::Remote,
            &mut self.rng,
        )
        .await;
        self.last_built_sentence.clone()
    }

    /// Rebuild the last submission with a fresh random choice.
    ///
    /// No tokenizing, no tagging and no thesaurus fetches: words are looked
    /// up in the cache only. Returns `""` before any submission.
    pub async fn rebuild(&mut self) -> String {
        if self.state() == SessionState::Idle {
            return String::new();
        }
        self.last_built_sentence = build(
            &self.typed_tokens,
            &self.resolver,
            Lookup::CacheOnly,
            &mut self.rng,
        )
        .await;
        self.last_built_sentence.clone()
    }

    /// Submit new text, or rebuild when it matches the last submission.
    ///
    /// `force` always submits.
    pub async fn generate(&mut self, text: &str, force: bool) -> String {
        let trimmed = text.trim();
        if !force
            && !trimmed.is_empty()
            && self.last_submitted_text.as_deref() == Some(trimmed)
        {
            debug!("Text unchanged; rebuilding");
            return self.rebuild().await;
        }
        self.submit(text).await
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.typed_tokens.clear();
        self.last_submitted_text = None;
        self.last_built_sentence.clear();
    }

    pub fn state(&self) -> SessionState {
        if self.last_submitted_text.is_some() {
            SessionState::Ready
        } else {
            SessionState::Idle
        }
    }

    pub fn last_submitted_text(&self) -> Option<&str> {
        self.last_submitted_text.as_deref()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn typed_tokens(&self) -> &[TypedToken] {
        &self.typed_tokens
    }

    pub fn last_built_sentence(&self) -> &str {
        &self.last_built_sentence
    }

    pub fn is_remote_tagging(&self) -> bool {
        self.classifier.is_remote()
    }

    pub fn breaker_state(&self) -> BreakerState {
        self.classifier.breaker_state()
    }

    pub fn can_fetch(&self) -> bool {
        self.resolver.can_fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{CannedThesaurus, ScriptedTagger, document};
    use synonymizer_cache::InMemoryStore;
    use synonymizer_core::provider::TaggedWord;
    use synonymizer_core::token::Category;

    fn offline(store: InMemoryStore) -> Session {
        Session::new(Arc::new(store)).with_seed(42)
    }

    #[tokio::test]
    async fn reference_sentence_without_entries() {
        let mut session = offline(InMemoryStore::new());
        let out = session.submit("The quick fox\njumps").await;

        assert_eq!(out, "The quick fox\njumps");
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.last_submitted_text(), Some("The quick fox\njumps"));
        let categories: Vec<Category> =
            session.typed_tokens().iter().map(|t| t.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Determiner,
                Category::Noun,
                Category::Noun,
                Category::Newline,
                Category::Verb,
            ]
        );
    }

    #[tokio::test]
    async fn empty_submission_resets() {
        let mut session = offline(InMemoryStore::new());
        session.submit("The fox").await;

        assert_eq!(session.submit("  \n ").await, "");
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.last_submitted_text().is_none());
        assert!(session.tokens().is_empty());
        assert!(session.typed_tokens().is_empty());
        assert_eq!(session.last_built_sentence(), "");
    }

    #[tokio::test]
    async fn rebuild_before_submit_is_empty() {
        let mut session = offline(InMemoryStore::new());
        assert_eq!(session.rebuild().await, "");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn category_mismatch_keeps_word() {
        let store = InMemoryStore::with_entries([("quick", document("adjective", &["fast"]))]);
        let mut session = offline(store);
        // The heuristic calls "quick" a noun
        assert_eq!(session.submit("quick").await, "quick");
    }

    #[tokio::test]
    async fn submit_records_trimmed_text() {
        let mut session = offline(InMemoryStore::new());
        session.submit("  fox \n").await;
        assert_eq!(session.last_submitted_text(), Some("fox"));
        assert_eq!(session.tokens().len(), 2);
    }

    #[tokio::test]
    async fn rebuild_makes_no_tagger_or_fetch_calls() {
        let tagger = Arc::new(ScriptedTagger::new(vec![Ok(vec![
            TaggedWord::new("The", "determiner"),
            TaggedWord::new("fox", "noun"),
        ])]));
        let source = Arc::new(
            CannedThesaurus::new().with_document("fox", &document("noun", &["vixen", "reynard"])),
        );
        let mut session = Session::new(Arc::new(InMemoryStore::new()))
            .with_tagger(tagger.clone())
            .with_thesaurus(source.clone())
            .with_seed(3);

        session.submit("The fox").await;
        let tokens = session.tokens().to_vec();
        let typed = session.typed_tokens().to_vec();

        for _ in 0..5 {
            let out = session.rebuild().await;
            assert!(out == "The vixen" || out == "The reynard", "{out}");
        }

        assert_eq!(tagger.call_count(), 1);
        assert_eq!(source.calls_for("fox"), 1);
        // "The" has no document; rebuilds never retry it
        assert_eq!(source.calls_for("The"), 2);
        assert_eq!(session.tokens(), tokens.as_slice());
        assert_eq!(session.typed_tokens(), typed.as_slice());
    }

    #[tokio::test]
    async fn found_words_fetched_once_per_submit() {
        let source =
            Arc::new(CannedThesaurus::new().with_document("fox", &document("noun", &["vixen"])));
        let mut session = Session::new(Arc::new(InMemoryStore::new()))
            .with_thesaurus(source.clone())
            .with_seed(1);

        assert_eq!(session.submit("fox fox").await, "vixen vixen");
        assert_eq!(source.calls_for("fox"), 1);
    }

    #[tokio::test]
    async fn failed_lookup_retried_by_next_submit() {
        let source = Arc::new(CannedThesaurus::new());
        let mut session = Session::new(Arc::new(InMemoryStore::new()))
            .with_thesaurus(source.clone())
            .with_seed(1);

        session.submit("fox").await;
        let after_submit = source.calls_for("fox");
        session.rebuild().await;
        assert_eq!(source.calls_for("fox"), after_submit);

        session.submit("fox").await;
        assert!(source.calls_for("fox") > after_submit);
    }

    #[tokio::test]
    async fn generate_routes_by_text() {
        let tagger = Arc::new(ScriptedTagger::new(vec![
            Ok(vec![TaggedWord::new("fox", "noun")]),
            Ok(vec![TaggedWord::new("fox", "noun")]),
            Ok(vec![TaggedWord::new("dog", "noun")]),
        ]));
        let mut session = Session::new(Arc::new(InMemoryStore::new()))
            .with_tagger(tagger.clone())
            .with_seed(9);

        session.generate("fox", false).await;
        assert_eq!(tagger.call_count(), 1);

        // Same text, surrounding whitespace ignored: rebuild
        session.generate("  fox\n", false).await;
        assert_eq!(tagger.call_count(), 1);

        // Forced: resubmit
        session.generate("fox", true).await;
        assert_eq!(tagger.call_count(), 2);

        // New text: submit
        assert_eq!(session.generate("dog", false).await, "dog");
        assert_eq!(tagger.call_count(), 3);

        // Empty: clear
        assert_eq!(session.generate("   ", false).await, "");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn remote_failures_fall_back_then_open() {
        let tagger = Arc::new(ScriptedTagger::failing());
        let mut session = Session::new(Arc::new(InMemoryStore::new()))
            .with_tagger(tagger.clone())
            .with_seed(0);

        for _ in 0..4 {
            assert_eq!(session.submit("The fox").await, "The fox");
        }

        assert_eq!(tagger.call_count(), 3);
        assert!(!session.is_remote_tagging());
        assert_eq!(session.breaker_state(), BreakerState::Open);
    }
}
