//! # rehydra-cli
//!
//! Command-line interface for Rehydra corpus rehydration.
//!
//! Wires the pipeline end to end: read a dehydrated IDs-only corpus,
//! crawl the source thread, assemble recovered dialogue turns, and write
//! the rehydrated corpus. The output contains user-generated content and
//! must not be redistributed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rehydra_core::{DehydratedCorpus, assemble};
use rehydra_scrape::{CrawlOptions, PageClient, crawl_thread};
use tracing::info;

/// Rehydra - rehydrate dehydrated dialogue corpora
#[derive(Parser, Debug)]
#[command(name = "rehydra")]
#[command(about = "Rehydrate a dehydrated dialogue corpus from its source thread", long_about = None)]
pub struct Args {
    /// Dehydrated IDs-only JSON input
    #[arg(long)]
    pub input: PathBuf,

    /// Rehydrated JSON output (local use only)
    #[arg(long)]
    pub output: PathBuf,

    /// User-Agent string for polite requests
    #[arg(long)]
    pub user_agent: String,

    /// Seconds to wait between page fetches
    #[arg(long, default_value_t = 1.0)]
    pub sleep: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Hard cap on pages fetched per thread
    #[arg(long, default_value_t = 2000)]
    pub max_pages: usize,

    /// Enable verbose diagnostics
    #[arg(long)]
    pub debug: bool,
}

/// Runs the rehydration pipeline.
///
/// Input-shape problems fail before any network I/O; a page fetch that
/// still fails after retries aborts the run without writing output.
pub async fn run(args: &Args) -> Result<()> {
    let corpus = DehydratedCorpus::load(&args.input)
        .with_context(|| format!("reading dehydrated input {}", args.input.display()))?;

    info!(
        thread_url = %corpus.thread_url,
        dialogues = corpus.dialogues.len(),
        turns = corpus.total_turns(),
        "loaded dehydrated corpus"
    );

    let client = PageClient::new(&args.user_agent, Duration::from_secs(args.timeout))
        .context("building HTTP client")?;
    let opts = CrawlOptions {
        sleep: Duration::from_secs_f64(args.sleep.max(0.0)),
        max_pages: args.max_pages,
    };

    let posts = crawl_thread(&client, &corpus.thread_url, &opts)
        .await
        .with_context(|| format!("crawling {}", corpus.thread_url))?;

    let rehydrated = assemble(&corpus, &posts, chrono::Local::now().date_naive());

    let recovered: usize = rehydrated
        .missing
        .values()
        .map(|s| s.n_turns - s.n_missing)
        .sum();
    info!(
        recovered,
        referenced = corpus.total_turns(),
        "assembled rehydrated corpus"
    );

    rehydrated
        .save(&args.output)
        .with_context(|| format!("writing rehydrated output {}", args.output.display()))?;

    info!(output = %args.output.display(), "wrote rehydrated corpus");
    Ok(())
}
