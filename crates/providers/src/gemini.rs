//! Gemini part-of-speech tagger.
//!
//! Sends the full sentence and its token list to a `generateContent`
//! endpoint and asks for a strict JSON array of `[word, category]` pairs.
//! The key travels in the `x-goog-api-key` header, never in the URL.
//!
//! Response normalization accepts the shapes the various Gemini API
//! revisions produce:
//! - `candidates[0].content.parts[*].text`
//! - `candidates[0].{content|output|text}` as a plain string
//! - `outputs[0].{…}` (same fields)
//! - top-level `output` / `content`
//! - otherwise the raw body itself

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use synonymizer_core::error::ProviderError;
use synonymizer_core::provider::{TaggedWord, Tagger};
use synonymizer_core::token::Token;
use tracing::{debug, warn};

use crate::redact::mask_secret;

/// Longest slice of an error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 1000;

/// A remote tagger backed by a Gemini model.
pub struct GeminiTagger {
    model: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiTagger {
    /// Create a new tagger.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the tagging instruction for `text` and its tokens.
    pub fn build_prompt(text: &str, tokens: &[Token]) -> String {
        let words: Vec<&str> = tokens.iter().map(Token::as_wire).collect();
        format!(
            "Using the sentence and the list of words provided, determine the word type \
             (part of speech) for each word based on its usage in the sentence. Use only these \
             word types: noun, verb, adjective, adverb, pronoun, determiner, preposition, \
             conjunction, numeral, punctuation, newline, other. Return ONLY a JSON array of \
             arrays in the same order as the words: [[\"original_word\",\"word_type\"], ...].\n\n\
             Sentence: {}\nWords: {}\n",
            serde_json::to_string(text).unwrap_or_default(),
            serde_json::to_string(&words).unwrap_or_default(),
        )
    }

    fn request_body(text: &str, tokens: &[Token]) -> Value {
        let max_tokens = (tokens.len() * 24).max(512);
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": Self::build_prompt(text, tokens) }],
            }],
            "generationConfig": {
                "temperature": 0.0,
                "maxOutputTokens": max_tokens,
                "responseMimeType": "application/json",
            },
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        let message = mask_secret(&e.to_string(), &self.api_key);
        if e.is_timeout() {
            ProviderError::Timeout(message)
        } else {
            ProviderError::Network(message)
        }
    }
}

#[async_trait]
impl Tagger for GeminiTagger {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn tag(&self, text: &str, tokens: &[Token]) -> Result<Vec<TaggedWord>, ProviderError> {
        debug!(model = %self.model, count = tokens.len(), "Sending tagging request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&Self::request_body(text, tokens))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !(200..300).contains(&status) {
            let body = mask_secret(truncate(&body, MAX_ERROR_BODY), &self.api_key);
            warn!(status, model = %self.model, "Tagger returned error");
            debug!(body = %body, "Tagger error body");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: body,
            });
        }

        parse_tagger_output(&body)
    }
}

/// Normalize a tagger response body into tagged words.
pub fn parse_tagger_output(body: &str) -> Result<Vec<TaggedWord>, ProviderError> {
    let text = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| extract_text(&v))
        .unwrap_or_else(|| body.to_string());

    let parsed: Value = serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| ProviderError::InvalidResponse(format!("tagger output is not JSON: {e}")))?;

    let items = parsed.as_array().ok_or_else(|| {
        ProviderError::InvalidResponse("tagger output is not a JSON array".into())
    })?;

    Ok(items
        .iter()
        .map(|item| match item.as_array() {
            Some(pair) if pair.len() >= 2 => {
                TaggedWord::new(value_text(&pair[0]), value_text(&pair[1]))
            }
            _ => TaggedWord::bare(value_text(item)),
        })
        .collect())
}

/// Pull the generated text out of a response wrapper, if there is one.
fn extract_text(value: &Value) -> Option<String> {
    let obj = value.as_object()?;

    let first = obj
        .get("candidates")
        .or_else(|| obj.get("outputs"))
        .and_then(Value::as_array)
        .and_then(|c| c.first());

    if let Some(first) = first {
        if let Some(parts) = first
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(Value::as_array)
        {
            let joined: String = parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect();
            if !joined.is_empty() {
                return Some(joined);
            }
        }

        for field in ["content", "output", "text"] {
            if let Some(s) = first.get(field).and_then(Value::as_str) {
                return Some(s.to_string());
            }
        }
    }

    ["output", "content"]
        .iter()
        .find_map(|field| obj.get(*field).and_then(Value::as_str))
        .map(String::from)
}

/// Remove a surrounding Markdown code fence (```json … ```).
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
