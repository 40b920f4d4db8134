//! Environment-driven configuration
//!
//! All settings come from environment variables so the pipeline can run
//! unattended. A missing API key is deliberately not a load-time failure:
//! the summarizer reports `AnalysisUnavailable` at call time and the
//! pipeline degrades to a placeholder summary instead of aborting.

use std::path::PathBuf;

/// Configuration for the summarization service client
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// API key (from OPENAI_API_KEY, may be empty)
    pub api_key: String,
    /// Model to use
    pub model: String,
    /// Temperature (lower = more deterministic)
    pub temperature: f32,
    /// Maximum tokens in response
    pub max_tokens: u32,
    /// Request timeout in seconds; a timeout is treated as an analysis error
    pub timeout_secs: u64,
}

impl SummarizerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: std::env::var("MINUTE_SCRIBE_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            temperature: 0.3,
            max_tokens: 4096,
            timeout_secs: std::env::var("MINUTE_SCRIBE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the sqlite database file
    pub db_path: PathBuf,
    /// Optional chat webhook for action-item notifications
    pub webhook_url: Option<String>,
    pub summarizer: SummarizerConfig,
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let db_path = std::env::var("MINUTE_SCRIBE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("minute-scribe.db"));

        Self {
            db_path,
            webhook_url: std::env::var("MINUTE_SCRIBE_WEBHOOK_URL")
                .ok()
                .filter(|u| !u.is_empty()),
            summarizer: SummarizerConfig::from_env(),
        }
    }
}
