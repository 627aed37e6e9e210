//! Record-level driver: input table -> summaries -> output table.
//!
//! [`summarize_records`] is an order-preserving map from input records to
//! output records. Requests run strictly one after another; each record's
//! failure is contained in that record's `Summary` cell.
//!
//! [`run`] wraps the map with table I/O. The input is validated before the
//! output directory is touched or the first request is sent, and the output
//! is written once, after the last request.

use crate::api::{summarize_or_sentinel, SummarizeAsync};
use crate::error::TableError;
use crate::inputs::read_records;
use crate::models::{InputRecord, OutputRecord};
use crate::outputs;
use crate::utils::{ensure_writable_dir, output_dir};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{info, instrument};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub failed: usize,
}

/// Output rows of a batch plus how many of them carry the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summaries {
    pub records: Vec<OutputRecord>,
    pub failed: usize,
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} {wide_bar} {pos}/{len} [{elapsed_precise}]")
    {
        pb.set_style(style);
    }
    pb.set_message("Summarizing articles");
    pb
}

/// Summarize each record in order, one request at a time.
///
/// The result has exactly one entry per input record, in input order.
#[instrument(level = "info", skip_all, fields(total = records.len()))]
pub async fn summarize_records<S>(summarizer: &S, records: Vec<InputRecord>) -> Summaries
where
    S: SummarizeAsync,
{
    let total = records.len();
    let progress = progress_bar(total);

    let outcomes: Vec<(OutputRecord, bool)> = stream::iter(records.into_iter().enumerate())
        .then(|(i, record)| {
            let progress = progress.clone();
            async move {
                info!(index = i + 1, total, url = %record.url, "Summarizing article");
                let summary = summarize_or_sentinel(summarizer, &record.url).await;
                progress.inc(1);
                (OutputRecord::new(record, summary.text), summary.failed)
            }
        })
        .collect()
        .await;
    progress.finish_and_clear();

    let failed = outcomes.iter().filter(|(_, failed)| *failed).count();
    Summaries {
        records: outcomes.into_iter().map(|(record, _)| record).collect(),
        failed,
    }
}

/// Read `input`, summarize every row, and write the table to `output`.
///
/// Fails before any request if the input cannot be read or lacks a required
/// column; in that case neither the output directory nor the output file is
/// created.
#[instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
pub async fn run<S>(summarizer: &S, input: &Path, output: &Path) -> Result<RunReport, TableError>
where
    S: SummarizeAsync,
{
    let records = read_records(input).await?;
    ensure_writable_dir(output_dir(output)).await?;

    let summaries = summarize_records(summarizer, records).await;
    outputs::csv::write_records(output, &summaries.records).await?;

    Ok(RunReport {
        total: summaries.records.len(),
        failed: summaries.failed,
    })
}
