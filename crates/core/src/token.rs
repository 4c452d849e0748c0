//! Token and part-of-speech domain types.
//!
//! A piece of text flows through the pipeline as a sequence of [`Token`]s,
//! then as an index-aligned sequence of [`TypedToken`]s once each token has
//! been assigned a [`Category`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Legacy textual stand-in for a line break.
///
/// Remote taggers sometimes echo it back instead of `"\n"`.
pub const NEWLINE_MARKER: &str = "_newLine";

/// A unit produced by tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    /// A run of word characters, possibly with one internal apostrophe.
    Word(String),
    /// A line break in the original text.
    Newline,
}

impl Token {
    pub fn word(text: impl Into<String>) -> Self {
        Self::Word(text.into())
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Self::Newline)
    }

    /// The word text, or `None` for a newline.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            Self::Newline => None,
        }
    }

    /// How the token is rendered when sent over the wire.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Word(w) => w,
            Self::Newline => "\n",
        }
    }
}

/// Grammatical role assigned to a token.
///
/// The lowercase label of each variant matches the functional label used by
/// thesaurus documents, so selection is a plain string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Numeral,
    Punctuation,
    Newline,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Noun,
        Category::Verb,
        Category::Adjective,
        Category::Adverb,
        Category::Pronoun,
        Category::Determiner,
        Category::Preposition,
        Category::Conjunction,
        Category::Numeral,
        Category::Punctuation,
        Category::Newline,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Noun => "noun",
            Category::Verb => "verb",
            Category::Adjective => "adjective",
            Category::Adverb => "adverb",
            Category::Pronoun => "pronoun",
            Category::Determiner => "determiner",
            Category::Preposition => "preposition",
            Category::Conjunction => "conjunction",
            Category::Numeral => "numeral",
            Category::Punctuation => "punctuation",
            Category::Newline => "newline",
            Category::Other => "other",
        }
    }

    /// Map a free-form label (e.g. from a remote tagger) onto a category.
    ///
    /// Matching ignores case and surrounding whitespace; anything
    /// unrecognized becomes [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == label)
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token paired with its grammatical category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedToken {
    pub token: Token,
    pub category: Category,
}

impl TypedToken {
    pub fn new(token: Token, category: Category) -> Self {
        Self { token, category }
    }

    pub fn newline() -> Self {
        Self::new(Token::Newline, Category::Newline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.as_str()), c);
        }
    }

    #[test]
    fn unknown_label_is_other() {
        assert_eq!(Category::from_label("noun phrase"), Category::Other);
        assert_eq!(Category::from_label(""), Category::Other);
    }

    #[test]
    fn from_label_ignores_case_and_padding() {
        assert_eq!(Category::from_label(" Adjective "), Category::Adjective);
        assert_eq!(Category::from_label("VERB"), Category::Verb);
    }

    #[test]
    fn newline_token_renders_as_line_break() {
        assert_eq!(Token::Newline.as_wire(), "\n");
        assert!(Token::Newline.as_word().is_none());
        assert_eq!(Token::word("fox").as_word(), Some("fox"));
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Preposition).unwrap();
        assert_eq!(json, "\"preposition\"");
    }
}
