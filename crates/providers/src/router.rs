//! Provider construction: builds whichever remote providers the config enables.
//!
//! Both providers are optional. A missing credential or template is not an
//! error; the pipeline simply runs without that provider.

use std::sync::Arc;
use std::time::Duration;
use synonymizer_config::AppConfig;
use synonymizer_core::provider::{Tagger, ThesaurusCredential, ThesaurusSource};
use tracing::{info, warn};

use crate::gemini::GeminiTagger;
use crate::thesaurus::HttpThesaurus;

/// The remote providers available to a session.
#[derive(Clone, Default)]
pub struct ProviderSet {
    pub tagger: Option<Arc<dyn Tagger>>,
    pub thesaurus: Option<Arc<dyn ThesaurusSource>>,
}

impl ProviderSet {
    /// No remote providers: local heuristics and cache only.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn with_thesaurus(mut self, thesaurus: Arc<dyn ThesaurusSource>) -> Self {
        self.thesaurus = Some(thesaurus);
        self
    }
}

/// Build providers from configuration.
///
/// `credential` is the thesaurus credential after cache bootstrap; the
/// `CachePresent` sentinel never enables the remote thesaurus.
pub fn build_from_config(
    config: &AppConfig,
    credential: Option<&ThesaurusCredential>,
) -> ProviderSet {
    let mut set = ProviderSet::offline();

    if let Some(key) = config.tagger.api_key.as_deref().filter(|k| !k.is_empty()) {
        match GeminiTagger::new(
            key,
            &config.tagger.model,
            &config.tagger.base_url,
            Duration::from_secs(config.tagger.timeout_secs),
        ) {
            Ok(tagger) => {
                info!(model = %config.tagger.model, "Remote tagging enabled");
                set.tagger = Some(Arc::new(tagger));
            }
            Err(e) => warn!(error = %e, "Remote tagging disabled"),
        }
    }

    let key = credential.and_then(ThesaurusCredential::key);
    match (config.thesaurus.link.as_deref(), key) {
        (Some(link), Some(key)) => {
            match HttpThesaurus::new(
                link,
                key,
                Duration::from_secs(config.thesaurus.timeout_secs),
            ) {
                Ok(thesaurus) => {
                    info!("Remote thesaurus enabled");
                    set.thesaurus = Some(Arc::new(thesaurus));
                }
                Err(e) => warn!(error = %e, "Remote thesaurus disabled"),
            }
        }
        (None, Some(_)) => info!("Thesaurus key present but no link configured; cache only"),
        (_, None) => info!("No thesaurus key; cache only"),
    }

    set
}
