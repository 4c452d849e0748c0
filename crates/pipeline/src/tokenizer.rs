//! Tokenizer: text to words and line breaks.
//!
//! A word is a maximal run of word characters bounded by word boundaries,
//! optionally joined to a second run by one internal apostrophe
//! (`don't`, `fox's`). Every `\n` is its own token. Everything else
//! (spaces, punctuation, symbols) is dropped.

use regex::Regex;
use std::sync::LazyLock;
use synonymizer_core::token::Token;

static LEXEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n|\b\w+(?:'\w+)?\b").expect("static regex")
});

/// Split `text` into word and newline tokens, in order.
///
/// CRLF and lone CR line endings are normalized to `\n` first.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    LEXEME
        .find_iter(&normalized)
        .map(|m| match m.as_str() {
            "\n" => Token::Newline,
            word => Token::word(word),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_and_newlines() {
        assert_eq!(
            tokenize("The quick fox\njumps"),
            vec![
                Token::word("The"),
                Token::word("quick"),
                Token::word("fox"),
                Token::Newline,
                Token::word("jumps"),
            ]
        );
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(
            tokenize("Hello, world!"),
            vec![Token::word("Hello"), Token::word("world")]
        );
    }

    #[test]
    fn keeps_single_internal_apostrophe() {
        assert_eq!(
            tokenize("don't stop"),
            vec![Token::word("don't"), Token::word("stop")]
        );
        // A second apostrophe starts a new lexeme
        assert_eq!(
            tokenize("rock'n'roll"),
            vec![Token::word("rock'n"), Token::word("roll")]
        );
    }

    #[test]
    fn leading_apostrophe_not_part_of_word() {
        assert_eq!(tokenize("'tis"), vec![Token::word("tis")]);
    }

    #[test]
    fn empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn consecutive_newlines_each_count() {
        assert_eq!(
            tokenize("a\n\nb"),
            vec![Token::word("a"), Token::Newline, Token::Newline, Token::word("b")]
        );
    }

    #[test]
    fn crlf_normalized() {
        assert_eq!(
            tokenize("a\r\nb\rc"),
            vec![
                Token::word("a"),
                Token::Newline,
                Token::word("b"),
                Token::Newline,
                Token::word("c"),
            ]
        );
    }

    #[test]
    fn unicode_words_and_numbers() {
        assert_eq!(
            tokenize("café 3.14 naïve_x"),
            vec![
                Token::word("café"),
                Token::word("3"),
                Token::word("14"),
                Token::word("naïve_x"),
            ]
        );
    }

    #[test]
    fn deterministic() {
        let text = "One line\nand another, with punctuation!";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
