//! Subcommand implementations and the wiring they share.

pub mod interactive;
pub mod onboard;
pub mod rewrite;
pub mod status;

use std::path::Path;
use std::sync::Arc;
use synonymizer_cache::{FileStore, bootstrap_credential};
use synonymizer_config::AppConfig;
use synonymizer_core::Error;
use synonymizer_core::store::KeyValueStore;
use synonymizer_pipeline::{ProfanityFilter, Session};
use synonymizer_providers::build_from_config;

pub fn load_config(path: Option<&Path>) -> synonymizer_core::Result<AppConfig> {
    AppConfig::load(path).map_err(|e| Error::Config {
        message: e.to_string(),
    })
}

/// Assemble a session from configuration: cache bootstrap, providers, store.
pub fn build_session(config: &AppConfig, seed: Option<u64>) -> Session {
    let credential = bootstrap_credential(config.thesaurus.api_key.as_deref(), &config.cache_dir);
    let providers = build_from_config(config, credential.as_ref());
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.cache_dir));

    let mut session = Session::new(store).with_failure_threshold(config.tagger.failure_threshold);
    if let Some(tagger) = providers.tagger {
        session = session.with_tagger(tagger);
    }
    if let Some(thesaurus) = providers.thesaurus {
        session = session.with_thesaurus(thesaurus);
    }
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }
    session
}

/// The output filter, if `--censor` or the config asks for one.
pub fn output_filter(config: &AppConfig, censor: bool) -> Option<ProfanityFilter> {
    (censor || config.output.profanity_filter)
        .then(|| ProfanityFilter::load(&config.output.profanity_list))
}

pub fn render(filter: Option<&ProfanityFilter>, text: &str) -> String {
    match filter {
        Some(filter) => filter.censor(text),
        None => text.to_string(),
    }
}
