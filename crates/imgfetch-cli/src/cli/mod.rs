//! CLI for the imgfetch image fetcher.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use imgfetch_core::config::DedupPolicy;
use std::path::PathBuf;

use commands::{run_checksum, run_completions, run_fetch, run_man};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "Fetch images from URLs, skip non-images and duplicates, save the rest", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch images and save them to the storage directory.
    Fetch(FetchArgs),

    /// Compute SHA-256 of a file (e.g. a stored image).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Image URLs; each argument may itself be a comma-separated list.
    /// With no URLs and no --input, a line of URLs is read from stdin.
    pub urls: Vec<String>,

    /// Read URLs from a file (one or more per line, `#` comments allowed).
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory to save images into (default: Fetched_Images).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Fetch up to N URLs at once (default 1: sequential, in input order).
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Duplicate detection: "filename" (same name, same bytes) or "content" (same bytes anywhere).
    #[arg(long, value_name = "POLICY")]
    pub dedup: Option<DedupPolicy>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Use this config file instead of ~/.config/imgfetch/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(args).await?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
