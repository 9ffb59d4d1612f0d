//! `imgfetch fetch [URLS...]` – fetch, validate, dedup and save images.

use anyhow::{Context, Result};
use imgfetch_core::config::{self, FetcherConfig};
use imgfetch_core::fetch::CurlTransport;
use imgfetch_core::input;
use imgfetch_core::pipeline::{self, ImagePipeline, Outcome, PipelineOptions, RunSummary};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::cli::FetchArgs;

const PROMPT: &str = "Enter image URLs (separate with commas): ";

/// Runs one batch. Per-URL failures are printed, never returned: the command
/// succeeds once every URL has been attempted.
pub async fn run_fetch(args: FetchArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;
    tracing::debug!("effective config: {:?}", cfg);

    let urls = collect_urls(&args)?;

    println!("🌐 Welcome to Giltech Online Cyber");
    println!("Ubuntu-Inspired Image Fetcher");
    println!("Mindfully collecting and organizing images for our community.\n");

    if urls.is_empty() {
        println!("No URLs given, nothing to fetch.");
        return Ok(());
    }

    let transport = CurlTransport::new(cfg.user_agent.clone());
    let pipeline = ImagePipeline::open(transport, PipelineOptions::from_config(&cfg))?;
    tracing::info!(count = urls.len(), jobs = cfg.jobs, "fetch run started");

    let outcomes =
        pipeline::run_parallel(Arc::new(pipeline), urls, cfg.jobs, print_outcome).await?;

    let summary = RunSummary::from_outcomes(&outcomes);
    tracing::info!("fetch run finished: {}", summary);
    println!("\n{}", summary);
    println!("🤝 Connection strengthened. Community enriched.");
    println!("💻 Powered by Giltech Online Cyber\n");
    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    println!("{}", outcome);
}

/// Config file (explicit, or the XDG default) with command-line overrides applied.
fn resolve_config(args: &FetchArgs) -> Result<FetcherConfig> {
    let mut cfg = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init().unwrap_or_else(|e| {
            tracing::warn!("config unavailable ({:#}), using defaults", e);
            FetcherConfig::default()
        }),
    };
    apply_overrides(&mut cfg, args);
    Ok(cfg)
}

fn apply_overrides(cfg: &mut FetcherConfig, args: &FetchArgs) {
    if let Some(dir) = &args.dir {
        cfg.storage_dir = dir.clone();
    }
    if let Some(jobs) = args.jobs {
        cfg.jobs = jobs;
    }
    if let Some(dedup) = args.dedup {
        cfg.dedup = dedup;
    }
    if let Some(timeout) = args.timeout {
        cfg.timeout_secs = timeout;
    }
}

/// URLs from --input and positional args; prompts on stdin when neither is given.
fn collect_urls(args: &FetchArgs) -> Result<Vec<String>> {
    let mut urls = match &args.input {
        Some(path) => input::read_url_file(path)?,
        None => Vec::new(),
    };
    urls.extend(args.urls.iter().flat_map(|arg| input::parse_url_list(arg)));

    if urls.is_empty() && args.input.is_none() {
        let stdin = io::stdin();
        return prompt_urls(stdin.lock(), io::stdout());
    }
    Ok(urls)
}

/// Writes the prompt and reads one line of comma-separated URLs.
fn prompt_urls<R: BufRead, W: Write>(mut reader: R, mut out: W) -> Result<Vec<String>> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;
    let mut line = String::new();
    reader.read_line(&mut line).context("read URLs from stdin")?;
    Ok(input::parse_url_list(&line))
}
