//! Credential masking for diagnostics.
//!
//! Anything that may end up in a log line and may contain a URL or a
//! response body passes through here first.

use std::sync::LazyLock;

static QUERY_KEY: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)([?&](?:key|api_key|apikey|token)=)[^&#\s]+")
        .expect("static regex")
});

/// Replace every occurrence of `secret` in `text` with `***`.
pub fn mask_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "***")
}

/// Mask the values of credential-looking query parameters in a URL.
pub fn mask_query_key(url: &str) -> String {
    QUERY_KEY.replace_all(url, "${1}***").into_owned()
}
