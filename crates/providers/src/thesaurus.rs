//! HTTP thesaurus client.
//!
//! Builds the request URL by substituting the word and the key into a
//! configured template, then returns the response body verbatim so it can be
//! cached as-is. The key is part of the URL, so every diagnostic goes through
//! [`mask_query_key`] and [`mask_secret`] first.

use async_trait::async_trait;
use std::time::Duration;
use synonymizer_core::error::ProviderError;
use synonymizer_core::provider::ThesaurusSource;
use tracing::{debug, warn};

use crate::redact::{mask_query_key, mask_secret};

/// A thesaurus reached over HTTP GET.
pub struct HttpThesaurus {
    link: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpThesaurus {
    pub fn new(
        link: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            link: link.into(),
            api_key: api_key.into(),
            client,
        })
    }

    fn masked(&self, text: &str) -> String {
        mask_query_key(&mask_secret(text, &self.api_key))
    }
}

/// Substitute `word` and `key` into a URL template.
///
/// Named (`{word}`, `{key}`) and indexed (`{0}`, `{1}`) slots are replaced
/// first; remaining `{}` slots are filled positionally, word then key.
pub fn build_url(template: &str, word: &str, key: &str) -> String {
    let named = template
        .replace("{word}", word)
        .replace("{key}", key)
        .replace("{0}", word)
        .replace("{1}", key);

    let mut out = String::with_capacity(named.len());
    let mut positional = [word, key].into_iter();
    let mut rest = named.as_str();
    while let Some(idx) = rest.find("{}") {
        out.push_str(&rest[..idx]);
        match positional.next() {
            Some(value) => out.push_str(value),
            None => out.push_str("{}"),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

#[async_trait]
impl ThesaurusSource for HttpThesaurus {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, word: &str) -> Result<String, ProviderError> {
        let url = build_url(&self.link, word, &self.api_key);
        debug!(word, "Fetching thesaurus data");

        let response = self.client.get(&url).send().await.map_err(|e| {
            let message = self.masked(&e.to_string());
            if e.is_timeout() {
                ProviderError::Timeout(message)
            } else {
                ProviderError::Network(message)
            }
        })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Thesaurus rejected the key".into(),
            ));
        }

        if !(200..300).contains(&status) {
            warn!(status, url = %self.masked(&url), "Thesaurus returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: format!("thesaurus lookup for '{word}' failed"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(self.masked(&e.to_string())))?;

        serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("thesaurus body is not JSON: {e}"))
        })?;

        Ok(body)
    }
}
