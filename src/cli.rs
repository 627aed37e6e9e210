//! Command-line interface definitions for Awful Summarize.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and the endpoint can also be supplied via environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Awful Summarize application.
///
/// # Examples
///
/// ```sh
/// # Summaries land in output/perplexity-summary-articles.csv
/// awful_summarize -i input/articles.csv --api-key pplx-...
///
/// # Explicit output path, key from the environment
/// PERPLEXITY_API_KEY=pplx-... awful_summarize -i articles.csv -o summaries.csv
///
/// # Any OpenAI-compatible endpoint
/// awful_summarize -i articles.csv --api-url http://localhost:8080/v1/chat/completions --model qwen
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input CSV with `URL` and `Title` columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path (default: output/perplexity-summary-<input stem>.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API key for the summarization endpoint
    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint URL
    #[arg(long, env = "PERPLEXITY_API_URL")]
    pub api_url: Option<String>,

    /// Model identifier sent with every request
    #[arg(long)]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "awful_summarize",
            "--input",
            "input/articles.csv",
            "--output",
            "out.csv",
            "--model",
            "sonar-pro",
        ]);

        assert_eq!(cli.input, PathBuf::from("input/articles.csv"));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.model.as_deref(), Some("sonar-pro"));
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "awful_summarize",
            "-i",
            "/tmp/a.csv",
            "-o",
            "/tmp/b.csv",
            "-c",
            "/tmp/config.yaml",
        ]);

        assert_eq!(cli.input, PathBuf::from("/tmp/a.csv"));
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/b.csv")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.yaml")));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["awful_summarize"]).is_err());
    }
}
