//! Synonymizer CLI — the main entry point.
//!
//! Commands:
//! - `rewrite`     — Rewrite text once (or several times) and print it
//! - `interactive` — Edit blocks of text and regenerate them on demand
//! - `status`      — Show configuration and cache state
//! - `onboard`     — Create the config directory and a default config

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "synonymizer",
    about = "Synonymizer — rewrite text with context-appropriate synonyms",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.synonymizer/config.toml)
    #[arg(short, long, global = true, env = "SYNONYMIZER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite text and print the result
    Rewrite {
        /// Text to rewrite (reads stdin when neither --text nor --file is given)
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of variants to print
        #[arg(short = 'n', long, default_value_t = 1)]
        variants: usize,

        /// Seed for reproducible synonym choice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Mask profanity in the output
        #[arg(long)]
        censor: bool,
    },

    /// Interactive mode: enter a block, end it with "." to generate
    Interactive {
        /// Seed for reproducible synonym choice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Mask profanity in the output
        #[arg(long)]
        censor: bool,
    },

    /// Show configuration and cache status
    Status,

    /// Initialize configuration
    Onboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for results
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Rewrite {
            text,
            file,
            variants,
            seed,
            censor,
        } => {
            let input = commands::rewrite::Input::from_args(text, file);
            commands::rewrite::run(config_path, input, variants, seed, censor).await?
        }
        Commands::Interactive { seed, censor } => {
            commands::interactive::run(config_path, seed, censor).await?
        }
        Commands::Status => commands::status::run(config_path).await?,
        Commands::Onboard => commands::onboard::run().await?,
    }

    Ok(())
}
