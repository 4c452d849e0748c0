//! Part-of-speech classification.
//!
//! Every token gets exactly one [`Category`]. A remote [`Tagger`] is used
//! when one is configured and its breaker is closed; otherwise, and whenever
//! the remote answer is unusable, a local heuristic decides.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use synonymizer_core::provider::{TaggedWord, Tagger};
use synonymizer_core::token::{Category, Token, TypedToken};
use tracing::{debug, info, warn};

use crate::breaker::{BreakerState, CircuitBreaker};

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "our", "their", "mine", "yours",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "each", "every", "no", "its",
];

const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "for", "to", "from", "by", "with", "about", "of", "into", "over", "under",
    "between", "among",
];

const CONJUNCTIONS: &[&str] = &["and", "but", "or", "nor", "so", "yet", "for"];

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W+$").expect("static regex"));

static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("static regex"));

/// Guess the category of a single word without any remote help.
pub fn guess_category(word: &str) -> Category {
    if NON_WORD.is_match(word) {
        return Category::Punctuation;
    }

    let lower = word.to_lowercase();
    if NUMERAL.is_match(&lower) {
        return Category::Numeral;
    }

    let closed_sets = [
        (PRONOUNS, Category::Pronoun),
        (DETERMINERS, Category::Determiner),
        (PREPOSITIONS, Category::Preposition),
        (CONJUNCTIONS, Category::Conjunction),
    ];
    if let Some((_, category)) = closed_sets
        .iter()
        .find(|(set, _)| set.contains(&lower.as_str()))
    {
        return *category;
    }

    if lower.ends_with("ly") {
        Category::Adverb
    } else if lower.ends_with("ing") || lower.ends_with("ed") || lower.ends_with('s') {
        Category::Verb
    } else {
        Category::Noun
    }
}

/// Heuristic category for a token.
pub fn heuristic_category(token: &Token) -> Category {
    match token {
        Token::Newline => Category::Newline,
        Token::Word(w) => guess_category(w),
    }
}

/// Classify every token with the local heuristic.
pub fn classify_heuristic(tokens: &[Token]) -> Vec<TypedToken> {
    tokens
        .iter()
        .map(|t| TypedToken::new(t.clone(), heuristic_category(t)))
        .collect()
}

/// Pair a remote tagging result with the tokens it was asked about.
///
/// The result must have one item per token, with line breaks in the same
/// positions. Items without a usable label fall back to the heuristic.
pub(crate) fn align(tokens: &[Token], tagged: &[TaggedWord]) -> Result<Vec<TypedToken>, String> {
    if tokens.len() != tagged.len() {
        return Err(format!(
            "expected {} tagged words, got {}",
            tokens.len(),
            tagged.len()
        ));
    }

    tokens
        .iter()
        .zip(tagged)
        .enumerate()
        .map(|(i, (token, tag))| match (token, tag.is_newline()) {
            (Token::Newline, true) => Ok(TypedToken::newline()),
            (Token::Word(_), false) => {
                let category = match tag.label.as_deref().map(Category::from_label) {
                    Some(Category::Newline) | None => heuristic_category(token),
                    Some(category) => category,
                };
                Ok(TypedToken::new(token.clone(), category))
            }
            _ => Err(format!("line break mismatch at position {i}")),
        })
        .collect()
}

/// Assigns categories, remotely when possible.
pub struct Classifier {
    tagger: Option<Arc<dyn Tagger>>,
    breaker: CircuitBreaker,
}

impl Classifier {
    /// A classifier that only uses the local heuristic.
    pub fn heuristic() -> Self {
        Self {
            tagger: None,
            breaker: CircuitBreaker::default(),
        }
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Consecutive remote failures tolerated before the tagger is dropped.
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.breaker = CircuitBreaker::new(threshold);
        self
    }

    /// Whether a remote tagger is still in use.
    pub fn is_remote(&self) -> bool {
        self.tagger.is_some()
    }

    pub fn breaker_state(&self) -> BreakerState {
        self.breaker.state()
    }

    /// Classify `tokens`, which were produced from `text`.
    ///
    /// Always returns one typed token per input token.
    pub async fn classify(&mut self, tokens: &[Token], text: &str) -> Vec<TypedToken> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let Some(tagger) = self.tagger.clone() else {
            return classify_heuristic(tokens);
        };

        let outcome = match tagger.tag(text, tokens).await {
            Ok(tagged) => align(tokens, &tagged),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(typed) => {
                debug!(tagger = tagger.name(), count = typed.len(), "Remote tagging succeeded");
                self.breaker.record_success();
                typed
            }
            Err(error) => {
                warn!(tagger = tagger.name(), error = %error, "Remote tagging failed; using heuristics");
                if self.breaker.record_failure() {
                    info!(tagger = tagger.name(), "Remote tagger dropped for this session");
                    self.tagger = None;
                }
                classify_heuristic(tokens)
            }
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::heuristic()
    }
}
