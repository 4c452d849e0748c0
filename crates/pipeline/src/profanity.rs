//! Output profanity filter.
//!
//! Whole-word, case-insensitive matching. Each alphabetic character of a
//! match becomes `*`; digits, apostrophes and the rest are kept.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Used when no list file exists or it has no words.
pub const FALLBACK_WORDS: &[&str] = &["damn", "hell", "shit", "fuck", "bitch", "asshole"];

#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    pattern: Option<Regex>,
    word_count: usize,
}

impl ProfanityFilter {
    /// Load a word list: one word per line, `#` starts a comment.
    ///
    /// A missing, unreadable or empty file yields the built-in list.
    pub fn load(path: &Path) -> Self {
        let words: Vec<String> = match std::fs::read_to_string(path) {
            Ok(content) => parse_list(&content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No profanity list; using built-in words");
                Vec::new()
            }
        };

        if words.is_empty() {
            Self::default()
        } else {
            Self::from_words(words)
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let mut ordered: Vec<&String> = words.iter().collect();
        ordered.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

        let pattern = if ordered.is_empty() {
            None
        } else {
            let alternation: Vec<String> = ordered.iter().map(|w| regex::escape(w)).collect();
            match Regex::new(&format!(r"(?i)\b(?:{})\b", alternation.join("|"))) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(error = %e, "Profanity pattern rejected; filter disabled");
                    None
                }
            }
        };

        Self {
            pattern,
            word_count: words.len(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn censor(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };
        pattern
            .replace_all(text, |caps: &Captures<'_>| mask(&caps[0]))
            .into_owned()
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::from_words(FALLBACK_WORDS)
    }
}

fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| line.split('#').next())
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn mask(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphabetic() { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn masks_whole_words_only() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.censor("Well, hell no"), "Well, **** no");
        assert_eq!(filter.censor("hello shell"), "hello shell");
    }

    #[test]
    fn case_insensitive() {
        let filter = ProfanityFilter::from_words(["darn"]);
        assert_eq!(filter.censor("DARN it, Darn"), "**** it, ****");
    }

    #[test]
    fn longest_match_wins() {
        let filter = ProfanityFilter::from_words(["ass", "asshole"]);
        assert_eq!(filter.censor("asshole"), "*******");
    }

    #[test]
    fn non_alphabetic_characters_survive() {
        let filter = ProfanityFilter::from_words(["b4d"]);
        assert_eq!(filter.censor("so b4d"), "so *4*");
    }

    #[test]
    fn loads_list_with_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("profanity_list.txt");
        std::fs::write(&path, "# custom words\nHeck\n  gosh  # mild\n\n").unwrap();

        let filter = ProfanityFilter::load(&path);
        assert_eq!(filter.word_count(), 2);
        assert_eq!(filter.censor("heck, gosh, damn"), "****, ****, damn");
    }

    #[test]
    fn missing_or_empty_file_uses_fallback() {
        let tmp = TempDir::new().unwrap();
        let missing = ProfanityFilter::load(&tmp.path().join("absent.txt"));
        assert_eq!(missing.word_count(), FALLBACK_WORDS.len());

        let empty_path = tmp.path().join("empty.txt");
        std::fs::write(&empty_path, "# nothing here\n").unwrap();
        assert_eq!(ProfanityFilter::load(&empty_path).censor("damn"), "****");
    }

    #[test]
    fn empty_word_list_passes_text_through() {
        let filter = ProfanityFilter::from_words(Vec::<String>::new());
        assert_eq!(filter.censor("damn"), "damn");
    }
}
