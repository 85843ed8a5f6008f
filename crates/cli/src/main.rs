//! DocChat CLI — the main entry point.
//!
//! Commands:
//! - `chat`   — Interactive document-chat session
//! - `ask`    — Single question, optionally loading documents first
//! - `config` — Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "docchat",
    about = "DocChat — chat with your documents through a long-context model",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session over your documents
    Chat {
        /// Documents to load before the first question
        #[arg(short, long)]
        doc: Vec<PathBuf>,
    },

    /// Ask one question and exit
    Ask {
        /// The question to ask
        #[arg(short, long)]
        message: String,

        /// Documents to load first
        #[arg(short, long)]
        doc: Vec<PathBuf>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { doc } => commands::chat::run(doc).await?,
        Commands::Ask { message, doc } => commands::ask::run(message, doc).await?,
        Commands::Config => commands::config_cmd::run()?,
    }

    Ok(())
}
