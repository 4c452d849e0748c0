//! `synonymizer status` — Show configuration and cache state.

use std::path::Path;
use synonymizer_cache::{FileStore, bootstrap_credential};
use synonymizer_config::AppConfig;
use synonymizer_core::Error;
use synonymizer_core::provider::ThesaurusCredential;
use synonymizer_core::store::KeyValueStore;
use synonymizer_providers::mask_query_key;

use super::load_config;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));

    let store = FileStore::new(&config.cache_dir);
    let entries = store.len().await.map_err(Error::from)?;
    let credential = bootstrap_credential(config.thesaurus.api_key.as_deref(), &config.cache_dir);

    let thesaurus = match (&credential, &config.thesaurus.link) {
        (Some(ThesaurusCredential::Key(_)), Some(_)) => "remote + cache",
        (Some(ThesaurusCredential::Key(_)), None) => "cache only (no link configured)",
        (Some(ThesaurusCredential::CachePresent), _) => "cache only (existing entries)",
        (None, _) => "cache only (no key)",
    };

    println!("Synonymizer Status");
    println!("==================");
    println!("  Config file:  {}", path.display());
    println!("  Cache dir:    {}", config.cache_dir.display());
    println!("  Cached words: {entries}");
    println!("  Thesaurus:    {thesaurus}");
    if let Some(link) = &config.thesaurus.link {
        println!("  Link:         {}", mask_query_key(link));
    }
    println!(
        "  Tagger:       {}",
        if config.has_tagger_key() {
            format!("{} (remote)", config.tagger.model)
        } else {
            "local heuristics".to_string()
        }
    );
    println!(
        "  Profanity:    {}",
        if config.output.profanity_filter { "filtered" } else { "off" }
    );

    if path.exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file — run `synonymizer onboard` to create one");
    }

    Ok(())
}
