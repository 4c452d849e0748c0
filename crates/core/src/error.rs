//! Error types for the Synonymizer domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Synonymizer operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Remote provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Cache errors ---
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures talking to a remote tagger or thesaurus.
///
/// Messages never carry credentials; callers mask URLs before building them.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O failed for '{key}': {reason}")]
    Io { key: String, reason: String },

    #[error("Cache entry '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 503,
            message: "Service Unavailable".into(),
        });
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn cache_error_names_key() {
        let err = Error::Cache(CacheError::Corrupt {
            key: "quick".into(),
            reason: "expected value at line 1".into(),
        });
        assert!(err.to_string().contains("quick"));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn cache_error_converts() {
        let err: Error = CacheError::Io {
            key: "fox".into(),
            reason: "permission denied".into(),
        }
        .into();
        assert!(matches!(err, Error::Cache(CacheError::Io { .. })));
    }
}
