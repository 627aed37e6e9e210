//! Runtime configuration.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. CLI flags / environment variables (see [`crate::cli::Cli`])
//! 2. An optional YAML file passed with `--config`
//! 3. Built-in defaults (Perplexity's `sonar` model)
//!
//! # YAML format
//!
//! ```yaml
//! api_url: https://api.perplexity.ai/chat/completions
//! model: sonar
//! api_key: pplx-...
//! ```
//!
//! Every key is optional.

use crate::cli::Cli;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

/// Default chat-completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.perplexity.ai/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "sonar";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("no API key provided (use --api-key, PERPLEXITY_API_KEY, or api_key in the config file)")]
    MissingApiKey,

    #[error("invalid API URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Contents of the YAML config file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    pub api_url: Url,
    pub model: String,
    pub api_key: String,
}

// Keep the key out of logs.
impl std::fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("api_url", &self.api_url.as_str())
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Read and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let parsed = parse_file_config(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    info!("Loaded config file");
    Ok(parsed)
}

fn parse_file_config(raw: &str) -> Result<FileConfig, serde_yaml::Error> {
    // An empty file deserializes to `null`, which is just "no overrides".
    if raw.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(raw)
}

impl SummarizerConfig {
    /// Merge CLI flags over the file config over defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .clone()
            .or(file.api_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = cli
            .api_url
            .clone()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;

        let model = cli
            .model
            .clone()
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_url,
            model,
            api_key,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec!["awful_summarize", "-i", "articles.csv"];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn test_defaults_apply() {
        let cfg = SummarizerConfig::resolve(&cli(&["--api-key", "k"]), FileConfig::default())
            .unwrap();
        assert_eq!(cfg.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.api_key, "k");
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            api_url: Some("http://file.local/v1/chat/completions".to_string()),
            model: Some("file-model".to_string()),
            api_key: Some("file-key".to_string()),
        };
        let cfg = SummarizerConfig::resolve(
            &cli(&["--api-key", "cli-key", "--model", "cli-model"]),
            file,
        )
        .unwrap();
        assert_eq!(cfg.api_key, "cli-key");
        assert_eq!(cfg.model, "cli-model");
        assert_eq!(cfg.api_url.as_str(), "http://file.local/v1/chat/completions");
    }

    #[test]
    fn test_missing_api_key() {
        let file = FileConfig {
            api_key: Some("   ".to_string()),
            ..FileConfig::default()
        };
        let err = SummarizerConfig::resolve(&cli(&[]), file).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_rejects_bad_api_url() {
        let err = SummarizerConfig::resolve(
            &cli(&["--api-key", "k", "--api-url", "ftp://example.com/x"]),
            FileConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));

        let err = SummarizerConfig::resolve(
            &cli(&["--api-key", "k", "--api-url", "not a url"]),
            FileConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));
    }

    #[test]
    fn test_parse_file_config() {
        let parsed = parse_file_config("model: sonar-pro\napi_key: abc\n").unwrap();
        assert_eq!(parsed.model.as_deref(), Some("sonar-pro"));
        assert_eq!(parsed.api_key.as_deref(), Some("abc"));
        assert_eq!(parsed.api_url, None);

        assert_eq!(parse_file_config("").unwrap(), FileConfig::default());
        assert!(parse_file_config("model: [unterminated").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let cfg = SummarizerConfig::resolve(&cli(&["--api-key", "secret"]), FileConfig::default())
            .unwrap();
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_load_file_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_url: http://127.0.0.1:9/chat\n").unwrap();
        let parsed = load_file_config(&path).await.unwrap();
        assert_eq!(parsed.api_url.as_deref(), Some("http://127.0.0.1:9/chat"));

        let missing = load_file_config(&dir.path().join("nope.yaml")).await;
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
