//! Configuration loading, validation, and management for Synonymizer.
//!
//! Loads configuration from `~/.synonymizer/config.toml` (or an explicit
//! path), imports any keys still missing from a legacy `config.json`, then
//! applies environment variable overrides. Every setting is optional: a
//! missing file yields defaults, and absent credentials simply disable the
//! corresponding remote feature.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the legacy JSON configuration file, looked up in the working directory.
pub const LEGACY_CONFIG_FILE: &str = "config.json";

/// The root configuration structure.
///
/// Maps directly to `~/.synonymizer/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding one cached thesaurus document per word
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Remote thesaurus settings
    #[serde(default)]
    pub thesaurus: ThesaurusConfig,

    /// Remote part-of-speech tagger settings
    #[serde(default)]
    pub tagger: TaggerConfig,

    /// Output post-processing
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("thesaurus_cache")
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("cache_dir", &self.cache_dir)
            .field("thesaurus", &self.thesaurus)
            .field("tagger", &self.tagger)
            .field("output", &self.output)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ThesaurusConfig {
    /// URL template with two slots: word, then key (`{}`, `{0}`/`{1}` or `{word}`/`{key}`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_thesaurus_timeout")]
    pub timeout_secs: u64,
}

fn default_thesaurus_timeout() -> u64 {
    5
}

impl Default for ThesaurusConfig {
    fn default() -> Self {
        Self {
            link: None,
            api_key: None,
            timeout_secs: default_thesaurus_timeout(),
        }
    }
}

impl std::fmt::Debug for ThesaurusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThesaurusConfig")
            .field("link", &self.link)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_tagger_timeout")]
    pub timeout_secs: u64,

    /// Consecutive failures before remote tagging is disabled for the session
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
}

fn default_model() -> String {
    "gemini-2.5-flash-lite".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_tagger_timeout() -> u64 {
    10
}
fn default_failure_threshold() -> u32 {
    3
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_tagger_timeout(),
            failure_threshold: default_failure_threshold(),
        }
    }
}

impl std::fmt::Debug for TaggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggerConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("failure_threshold", &self.failure_threshold)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub profanity_filter: bool,

    #[serde(default = "default_profanity_list")]
    pub profanity_list: PathBuf,
}

fn default_profanity_list() -> PathBuf {
    PathBuf::from("profanity_list.txt")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            profanity_filter: false,
            profanity_list: default_profanity_list(),
        }
    }
}

/// Shape of the legacy `config.json`.
#[derive(Debug, Default, Deserialize)]
struct LegacyConfig {
    #[serde(rename = "APIKeys", default)]
    api_keys: LegacyKeys,
}

#[derive(Debug, Default, Deserialize)]
struct LegacyKeys {
    #[serde(rename = "thesaurus-key", default)]
    thesaurus_key: Option<String>,
    #[serde(rename = "thesaurus-link", default)]
    thesaurus_link: Option<String>,
    #[serde(rename = "gemini-key", default)]
    gemini_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// Also checks, in order:
    /// - `config.json` in the working directory (legacy `APIKeys` block)
    /// - `SYNONYMIZER_THESAURUS_KEY`, `SYNONYMIZER_THESAURUS_LINK`
    /// - `SYNONYMIZER_GEMINI_KEY` / `GEMINI_API_KEY`
    /// - `SYNONYMIZER_MODEL`, `SYNONYMIZER_CACHE_DIR`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Self::config_dir().join("config.toml"));
        let mut config = Self::load_from(&config_path)?;

        config.import_legacy(Path::new(LEGACY_CONFIG_FILE));
        config.apply_env(|name| std::env::var(name).ok());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Fill still-unset credentials from a legacy JSON config.
    ///
    /// Missing or unparseable files are ignored.
    pub fn import_legacy(&mut self, path: &Path) {
        let legacy = match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|c| serde_json::from_str::<LegacyConfig>(&c).map_err(|e| e.to_string()))
        {
            Ok(legacy) => legacy,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No legacy config loaded");
                return;
            }
        };

        let keys = legacy.api_keys;
        fill(&mut self.thesaurus.api_key, keys.thesaurus_key);
        fill(&mut self.thesaurus.link, keys.thesaurus_link);
        fill(&mut self.tagger.api_key, keys.gemini_key);
        tracing::debug!(path = %path.display(), "Imported legacy config keys");
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fill(&mut self.thesaurus.api_key, lookup("SYNONYMIZER_THESAURUS_KEY"));
        fill(&mut self.thesaurus.link, lookup("SYNONYMIZER_THESAURUS_LINK"));
        fill(
            &mut self.tagger.api_key,
            lookup("SYNONYMIZER_GEMINI_KEY").or_else(|| lookup("GEMINI_API_KEY")),
        );

        if let Some(model) = lookup("SYNONYMIZER_MODEL").filter(|m| !m.is_empty()) {
            self.tagger.model = model;
        }

        if let Some(dir) = lookup("SYNONYMIZER_CACHE_DIR").filter(|d| !d.is_empty()) {
            self.cache_dir = PathBuf::from(dir);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".synonymizer")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.thesaurus.timeout_secs == 0 || self.tagger.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.tagger.failure_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "tagger.failure_threshold must be at least 1".into(),
            ));
        }

        if let Some(link) = &self.thesaurus.link
            && template_slots(link) < 2
        {
            return Err(ConfigError::ValidationError(
                "thesaurus.link needs two slots (word, key)".into(),
            ));
        }

        Ok(())
    }

    /// Whether a thesaurus key is available (from config, legacy file, or environment).
    pub fn has_thesaurus_key(&self) -> bool {
        self.thesaurus.api_key.is_some()
    }

    /// Whether remote tagging is configured.
    pub fn has_tagger_key(&self) -> bool {
        self.tagger.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            thesaurus: ThesaurusConfig::default(),
            tagger: TaggerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Set `slot` from `value` unless it is already set. Empty strings count as unset.
fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.as_deref().is_none_or(str::is_empty)
        && let Some(v) = value.filter(|v| !v.is_empty())
    {
        *slot = Some(v);
    }
}

/// Count substitution slots in a URL template.
pub fn template_slots(template: &str) -> usize {
    ["{}", "{0}", "{1}", "{word}", "{key}"]
        .iter()
        .map(|slot| template.matches(slot).count())
        .sum()
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
