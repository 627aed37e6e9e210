//! Data models for table rows and the chat-completions wire format.
//!
//! - [`InputRecord`] / [`OutputRecord`]: one row of the input and output CSV
//! - [`ChatRequest`] / [`ChatMessage`]: the request body sent to the endpoint
//! - [`ChatResponse`]: the subset of the response body we read
//!
//! Output rows use the capitalized column names of the CSV file, hence the
//! `#[serde(rename)]` attributes.

use serde::{Deserialize, Serialize};

/// One row of the input table.
///
/// Only `URL` and `Title` are read; any other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub url: String,
    pub title: String,
}

/// One row of the output table, paired 1:1 with an [`InputRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Cleaned prose, or [`crate::api::FAILED_SUMMARY`] when the request failed.
    #[serde(rename = "Summary")]
    pub summary: String,
}

impl OutputRecord {
    /// Pair an input row with its summary.
    pub fn new(record: InputRecord, summary: String) -> Self {
        Self {
            url: record.url,
            title: record.title,
            summary,
        }
    }
}

/// A single chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
}

/// Response body of `POST /chat/completions`, trimmed to what we use.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first completion, if the model produced one.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}
