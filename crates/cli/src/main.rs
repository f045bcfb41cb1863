mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;

use docqa_core::config::{load_dotenv, Config};

use crate::cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    load_dotenv();
    let config = Config::from_env().context("failed to load configuration")?;
    config.log_summary();

    match args.command {
        Command::Chunk { document, out } => {
            commands::chunk(&config, &document, out.as_deref()).await
        }
        Command::Ask {
            document,
            question,
            top_k,
        } => commands::ask(&config, &document, &question, top_k).await,
    }
}
