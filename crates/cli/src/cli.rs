use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Document question answering over converted markdown.
#[derive(Parser, Debug)]
#[command(name = "docqa", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chunk a converted markdown document and report (or export) the result.
    Chunk {
        /// Path to the converted markdown file (with `# Page N` markers).
        document: PathBuf,

        /// Write chunks as JSONL to this path.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Answer a question against a document (ingest, embed, retrieve, generate).
    Ask {
        /// Path to the converted markdown file (with `# Page N` markers).
        document: PathBuf,

        /// The question to answer.
        question: String,

        /// Override the configured number of candidates to retrieve.
        #[arg(long)]
        top_k: Option<usize>,
    },
}
