//! `synonymizer rewrite` — One-shot rewrite.

use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::{build_session, load_config, output_filter, render};

/// Where the text comes from.
pub enum Input {
    Text(String),
    File(PathBuf),
    Stdin,
}

impl Input {
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => Self::Text(text),
            (None, Some(path)) => Self::File(path),
            (None, None) => Self::Stdin,
        }
    }

    async fn read(self) -> Result<String, Box<dyn std::error::Error>> {
        Ok(match self {
            Self::Text(text) => text,
            Self::File(path) => tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
            Self::Stdin => {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                buf
            }
        })
    }
}

pub async fn run(
    config_path: Option<&Path>,
    input: Input,
    variants: usize,
    seed: Option<u64>,
    censor: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let text = input.read().await?;
    let filter = output_filter(&config, censor);
    let mut session = build_session(&config, seed);

    let variants = variants.max(1);
    debug!(variants, chars = text.len(), "Rewriting");

    for i in 0..variants {
        let output = if i == 0 {
            session.submit(&text).await
        } else {
            session.rebuild().await
        };
        if i > 0 {
            println!();
        }
        println!("{}", render(filter.as_ref(), &output));
    }

    Ok(())
}
