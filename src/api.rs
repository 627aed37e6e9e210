//! Summarization requests against an OpenAI-compatible chat API.
//!
//! # Architecture
//!
//! - [`SummarizeAsync`]: core trait, one URL in, cleaned summary or error out
//! - [`SummaryContext`]: the HTTP implementation; immutable and shared by
//!   reference for the whole run
//! - [`summarize_or_sentinel`]: the per-record failure policy. Errors are
//!   logged and replaced by [`FAILED_SUMMARY`] so the row is never dropped.
//!
//! One attempt per record. There is no retry, no backoff and no timeout
//! beyond the HTTP client's defaults.

use crate::config::SummarizerConfig;
use crate::error::SummarizeError;
use crate::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::normalize::clean;
use crate::utils::truncate_for_log;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Summary written for a record whose request failed.
pub const FAILED_SUMMARY: &str = "ERROR: Failed to summarize.";

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "Summarize the article using natural, human-like prose in a formal tone. \
Do not use any markdown, formatting characters (like asterisks or underscores), or bullet points. \
Do not include any newlines or line breaks. Return a single paragraph suitable for display in a CSV file.";

/// Trait for async article summarization.
///
/// Implementors take an article URL and return a cleaned, single-paragraph
/// summary. The trait is the seam between the pipeline and the network.
pub trait SummarizeAsync {
    /// Summarize the article at `url`.
    async fn summarize(&self, url: &str) -> Result<String, SummarizeError>;
}

/// User instruction for one article.
pub fn user_prompt(url: &str) -> String {
    format!("Please read and summarize the article at '{url}'.")
}

/// Build the request body for one article. A fresh payload per call.
pub fn build_request<'a>(model: &'a str, url: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt(url))],
    }
}

/// Immutable execution context for summarization requests.
///
/// Holds the HTTP client (and its connection pool), endpoint, model and key.
pub struct SummaryContext {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl SummaryContext {
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.api_url,
            model: config.model,
            api_key: config.api_key,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for SummaryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryContext")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish()
    }
}

impl SummarizeAsync for SummaryContext {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn summarize(&self, url: &str) -> Result<String, SummarizeError> {
        let t0 = Instant::now();
        let payload = build_request(&self.model, url);

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            warn!(
                %status,
                elapsed_ms = dt.as_millis(),
                body_preview = %truncate_for_log(&body, 300),
                "Endpoint returned non-success status"
            );
            return Err(SummarizeError::Status { status, body });
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            SummarizeError::ResponseFormat(format!(
                "{e}; body: {}",
                truncate_for_log(&body, 300)
            ))
        })?;
        let raw = parsed.first_content().ok_or_else(|| {
            SummarizeError::ResponseFormat("missing choices[0].message.content".to_string())
        })?;

        debug!(elapsed_ms = dt.as_millis(), bytes = raw.len(), "Received summary");
        Ok(clean(&raw))
    }
}

/// Summary cell for one record, and whether its request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub text: String,
    pub failed: bool,
}

/// Summarize `url`, substituting [`FAILED_SUMMARY`] on any failure.
///
/// Never fails. Errors are logged at ERROR with the URL and detail.
pub async fn summarize_or_sentinel<S>(summarizer: &S, url: &str) -> RecordSummary
where
    S: SummarizeAsync,
{
    match summarizer.summarize(url).await {
        Ok(text) => RecordSummary {
            text,
            failed: false,
        },
        Err(e) => {
            error!(%url, error = %e, "Error summarizing article");
            RecordSummary {
                text: FAILED_SUMMARY.to_string(),
                failed: true,
            }
        }
    }
}
