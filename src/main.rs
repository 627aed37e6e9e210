//! # Awful Summarize
//!
//! Batch summarizer for lists of articles. Reads a CSV of `URL`/`Title`
//! rows, asks an OpenAI-compatible chat endpoint (Perplexity `sonar` by
//! default) to summarize each article, strips markdown residue from the
//! answers, and writes a `URL,Title,Summary` CSV.
//!
//! ## Usage
//!
//! ```sh
//! PERPLEXITY_API_KEY=pplx-... awful_summarize -i input/articles.csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Load**: read and validate the input table (fatal on missing columns),
//!    then create and probe the output directory
//! 2. **Summarize**: one request per row, strictly in order; a failed row gets
//!    a sentinel summary instead of aborting the run
//! 3. **Output**: write the result table once, after every row was attempted

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod config;
mod error;
mod inputs;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod utils;

use api::SummaryContext;
use cli::Cli;
use config::{load_file_config, FileConfig, SummarizerConfig};
use utils::default_output_path;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("awful_summarize starting up");

    let args = Cli::parse();
    debug!(?args.input, ?args.output, ?args.config, "Parsed CLI arguments");

    // ---- Configuration ----
    let file_config = match &args.config {
        Some(path) => load_file_config(path).await.inspect_err(|e| {
            error!(error = %e, "Failed to load config file");
        })?,
        None => FileConfig::default(),
    };
    let config = SummarizerConfig::resolve(&args, file_config).inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;
    info!(api_url = %config.api_url, model = %config.model, "Configuration resolved");

    // ---- Output location ----
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    // ---- Summarize ----
    let context = SummaryContext::new(config);
    debug!(endpoint = %context.endpoint(), model = context.model(), "Summary context ready");

    let report = match pipeline::run(&context, &args.input, &output_path).await {
        Ok(report) => report,
        Err(e) => {
            error!(
                input = %args.input.display(),
                output = %output_path.display(),
                error = %e,
                "Summarization run aborted"
            );
            return Err(e.into());
        }
    };

    info!(
        path = %output_path.display(),
        total = report.total,
        failed = report.failed,
        "Summaries saved"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
