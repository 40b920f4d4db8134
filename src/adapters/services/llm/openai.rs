//! OpenAI summarizer adapter
//!
//! Implements the SummarizerPort against OpenAI's chat completions API. The
//! whole analysis is a single request whose response must be one JSON object
//! in the SummaryRecord shape.

use crate::config::SummarizerConfig;
use crate::domain::models::Meeting;
use crate::domain::prompts::analysis_prompt;
use crate::domain::summary::SummaryRecord;
use crate::error::{AppError, Result};
use crate::ports::summarizer::SummarizerPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI-backed summarization service
pub struct OpenAiSummarizer {
    client: Client,
    config: SummarizerConfig,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiSummarizer {
    /// Create a new summarizer from configuration
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request_body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        log::info!(
            "Calling OpenAI chat completion with model: {}",
            self.config.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", OPENAI_API_BASE))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Analysis("Summarization request timed out".to_string())
                } else {
                    AppError::Analysis(format!("Summarization request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Analysis(format!(
                "Summarization request failed: {}",
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Analysis(format!("Failed to parse completion response: {}", e)))?;

        match completion.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(AppError::Analysis(
                "No completion choices returned".to_string(),
            )),
        }
    }
}

/// Strip a single surrounding markdown code fence, if present.
///
/// Models sometimes wrap the JSON in ```json ... ``` despite the
/// JSON-only instruction.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[async_trait]
impl SummarizerPort for OpenAiSummarizer {
    async fn summarize(&self, transcript: &str, meeting: &Meeting) -> Result<SummaryRecord> {
        if !self.is_configured() {
            return Err(AppError::AnalysisUnavailable(
                "No OpenAI API key is configured".to_string(),
            ));
        }

        let prompt = analysis_prompt(meeting, transcript);
        let content = self.complete(prompt).await?;

        let record: SummaryRecord =
            serde_json::from_str(strip_code_fence(&content)).map_err(|e| {
                AppError::Analysis(format!(
                    "Summarization response did not match the expected shape: {}",
                    e
                ))
            })?;

        log::info!(
            "Summarization succeeded for meeting '{}': {} discussion points",
            meeting.title,
            record.key_discussion_points.len()
        );

        Ok(record)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> SummarizerConfig {
        SummarizerConfig {
            api_key: api_key.to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 4096,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_configured_with_key() {
        let service = OpenAiSummarizer::new(config("test_api_key")).unwrap();
        assert_eq!(service.provider_name(), "openai");
        assert!(service.is_configured());
    }

    #[tokio::test]
    async fn test_summarize_without_key_is_unavailable() {
        let service = OpenAiSummarizer::new(config("")).unwrap();
        assert!(!service.is_configured());

        let meeting = Meeting::new("M".to_string());
        let err = service.summarize("transcript", &meeting).await.unwrap_err();
        assert!(matches!(err, AppError::AnalysisUnavailable(_)));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
