/// Summarization service port trait
///
/// Defines the interface for the external LLM that turns a canonical
/// transcript into a structured SummaryRecord.
use crate::domain::models::Meeting;
use crate::domain::summary::SummaryRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for summarization services
#[async_trait]
pub trait SummarizerPort: Send + Sync {
    /// Summarize a canonical transcript in the context of its meeting.
    ///
    /// Fails with `AnalysisUnavailable` when no credential is configured and
    /// `Analysis` when the remote call fails, times out, or returns content
    /// that does not parse into the SummaryRecord shape. Callers are
    /// expected to substitute `SummaryRecord::placeholder` on failure.
    async fn summarize(&self, transcript: &str, meeting: &Meeting) -> Result<SummaryRecord>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is configured (has API key)
    fn is_configured(&self) -> bool;
}
