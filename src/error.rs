//! Error types for the summarization run.
//!
//! Two families, with different blast radius:
//!
//! - [`SummarizeError`]: one record's request failed. The pipeline downgrades
//!   it to the sentinel summary and keeps going.
//! - [`TableError`]: the input or output table could not be used. Fatal for
//!   the whole run.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single summarization request.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Transport failure: DNS, connect, TLS, timeout, body read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not the expected chat-completions JSON.
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),
}

/// Failure reading or writing a CSV table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("input table is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_all() {
        let e = TableError::MissingColumns(vec!["URL", "Title"]);
        assert_eq!(
            e.to_string(),
            "input table is missing required column(s): URL, Title"
        );
    }

    #[test]
    fn test_status_message() {
        let e = SummarizeError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "endpoint returned 500 Internal Server Error: boom");
    }
}
