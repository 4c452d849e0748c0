//! Cache key normalization.

/// Longest key, in characters.
pub const MAX_KEY_LEN: usize = 200;

/// Filesystem-safe key for a word.
///
/// Trims, lowercases, replaces every character outside `[A-Za-z0-9._-]`
/// with `_`, and truncates to [`MAX_KEY_LEN`] characters.
pub fn cache_key(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_KEY_LEN)
        .collect()
}
