//! `synonymizer interactive` — Block editor on stdin.
//!
//! Lines accumulate into a block. A line containing only `.` generates:
//! a changed block is submitted, an unchanged one just gets fresh synonyms.
//! Processing happens on a background worker so Ctrl+C stays responsive.

use std::path::Path;
use synonymizer_pipeline::{WorkerHandle, spawn_worker};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use super::{build_session, load_config, output_filter, render};

const QUEUE_CAPACITY: usize = 8;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Line(String),
    Generate,
    Again,
    Force,
    Clear,
    Quit,
}

fn parse_line(line: &str) -> Command {
    match line.trim() {
        "." => Command::Generate,
        ":again" => Command::Again,
        ":force" => Command::Force,
        ":clear" => Command::Clear,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Line(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// The text being edited.
#[derive(Default)]
struct Block {
    pending: Vec<String>,
    current: String,
}

impl Block {
    fn push(&mut self, line: String) {
        self.pending.push(line);
    }

    /// Commit pending lines, if any, and return the text to generate from.
    fn commit(&mut self) -> &str {
        if !self.pending.is_empty() {
            self.current = self.pending.join("\n");
            self.pending.clear();
        }
        &self.current
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.current.clear();
    }
}

pub async fn run(
    config_path: Option<&Path>,
    seed: Option<u64>,
    censor: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let filter = output_filter(&config, censor);
    let session = build_session(&config, seed);
    let remote = session.is_remote_tagging();
    let (handle, worker) = spawn_worker(session, QUEUE_CAPACITY);

    eprintln!();
    eprintln!("  Synonymizer — Interactive Mode");
    eprintln!("  Tagger:    {}", if remote { config.tagger.model.as_str() } else { "local heuristics" });
    eprintln!("  Cache:     {}", config.cache_dir.display());
    eprintln!();
    eprintln!("  Type text, then a line with only '.' to generate.");
    eprintln!("  ':again' new synonyms, ':force' re-tag, ':clear' reset, ':quit' exit.");
    eprintln!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut block = Block::default();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted; shutting down");
                break;
            }
        };

        let Some(line) = line else {
            break; // EOF (Ctrl+D)
        };

        let reply = match parse_line(&line) {
            Command::Line(text) => {
                block.push(text);
                continue;
            }
            Command::Generate => handle.generate(block.commit(), false).await,
            Command::Force => handle.generate(block.commit(), true).await,
            Command::Again => handle.rebuild().await,
            Command::Clear => {
                block.clear();
                handle.submit("").await.map(|_| {
                    eprintln!("  (cleared)");
                    String::new()
                })
            }
            Command::Quit => break,
        };

        match reply {
            Ok(output) if !output.is_empty() => {
                println!("{}", render(filter.as_ref(), &output));
                println!();
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Worker unavailable");
                break;
            }
        }
    }

    shutdown(&handle).await;
    if let Err(e) = worker.await {
        warn!(error = %e, "Worker task ended abnormally");
    }
    Ok(())
}

async fn shutdown(handle: &WorkerHandle) {
    if let Err(e) = handle.shutdown().await {
        warn!(error = %e, "Worker already stopped");
    }
}
