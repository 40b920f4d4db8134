//! Pipeline orchestration
//!
//! Sequences normalize -> summarize -> derive -> persist for one meeting.
//! Summarizer failures degrade to a placeholder summary instead of aborting,
//! and a re-analysis supersedes the previous machine-derived batch rather
//! than piling duplicates on top of it.

use crate::domain::models::{ActionItem, ActionStatus, AnalysisState, Decision, Meeting};
use crate::domain::summary::SummaryRecord;
use crate::error::{AppError, Result};
use crate::pipeline::derive::{derive_action_items, derive_decisions};
use crate::pipeline::normalize::{normalize_upload, TranscriptUpload};
use crate::ports::notifier::NotifierPort;
use crate::ports::storage::StoragePort;
use crate::ports::summarizer::SummarizerPort;
use std::sync::Arc;
use uuid::Uuid;

/// What one analysis pass produced
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub meeting_id: i64,
    pub summary_id: i64,
    pub decisions_created: usize,
    pub action_items_created: usize,
    /// Machine-derived entities from a previous pass that were superseded
    pub superseded: usize,
    /// True when the summary is a placeholder rather than real analysis
    pub degraded: bool,
}

/// Orchestrates the transcript analysis pipeline
pub struct AnalysisPipeline {
    storage: Arc<dyn StoragePort>,
    summarizer: Arc<dyn SummarizerPort>,
    notifier: Option<Arc<dyn NotifierPort>>,
}

impl AnalysisPipeline {
    pub fn new(storage: Arc<dyn StoragePort>, summarizer: Arc<dyn SummarizerPort>) -> Self {
        Self {
            storage,
            summarizer,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotifierPort>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Store an uploaded transcript, creating the meeting when none was
    /// targeted. Returns the meeting id.
    ///
    /// An undecodable file is not fatal: the meeting keeps (or gains) its
    /// record with source metadata only and no transcript text.
    pub async fn ingest_transcript(
        &self,
        meeting_id: Option<i64>,
        upload: &TranscriptUpload,
    ) -> Result<i64> {
        let normalized = match normalize_upload(upload) {
            Ok(normalized) => Some(normalized),
            Err(AppError::Read(reason)) => {
                log::warn!(
                    "Transcript '{}' not decodable, storing metadata only: {}",
                    upload.filename,
                    reason
                );
                None
            }
            Err(e) => return Err(e),
        };

        let id = match meeting_id {
            Some(id) => id,
            None => {
                let title = normalized
                    .as_ref()
                    .and_then(|n| n.derived_title.clone())
                    .unwrap_or_else(|| upload.filename.clone());
                let id = self.storage.create_meeting(&Meeting::new(title)).await?;
                log::info!("Created meeting {} for uploaded transcript", id);
                id
            }
        };

        let mut meeting = self
            .storage
            .get_meeting(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("meeting {}", id)))?;

        match normalized {
            Some(normalized) => {
                for participant in normalized.participants {
                    meeting.add_participant(participant);
                }
                meeting.attach_transcript(normalized.text, Some(upload.filename.clone()));
            }
            None => {
                meeting.transcript_source = Some(upload.filename.clone());
            }
        }

        self.storage.update_meeting(&meeting).await?;
        Ok(id)
    }

    /// Run one analysis pass for a meeting with a stored transcript.
    pub async fn analyze_meeting(&self, meeting_id: i64) -> Result<AnalysisOutcome> {
        let mut meeting = self
            .storage
            .get_meeting(meeting_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("meeting {}", meeting_id)))?;

        let transcript = meeting
            .transcript
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation(format!("meeting {} has no transcript text", meeting_id))
            })?;

        meeting.analysis_state = AnalysisState::Analyzing;
        self.storage.update_meeting(&meeting).await?;

        let (summary, degraded) = match self.summarizer.summarize(&transcript, &meeting).await {
            Ok(summary) => (summary, false),
            Err(AppError::AnalysisUnavailable(reason)) => {
                log::warn!("Summarization unavailable for meeting {}: {}", meeting_id, reason);
                (SummaryRecord::placeholder(&reason), true)
            }
            Err(AppError::Analysis(reason)) => {
                log::error!("Summarization failed for meeting {}: {}", meeting_id, reason);
                (SummaryRecord::placeholder(&reason), true)
            }
            Err(e) => {
                self.record_failed_state(&mut meeting).await;
                return Err(e);
            }
        };

        // The unique constraint behind upsert_summary keeps this safe even
        // when two analysis passes race; no app-level existence check.
        let summary_id = match self.storage.upsert_summary(meeting_id, &summary).await {
            Ok(id) => id,
            Err(e) => {
                self.record_failed_state(&mut meeting).await;
                return Err(e);
            }
        };

        let decision_drafts = derive_decisions(&summary, &meeting.participants);
        let action_drafts = derive_action_items(&summary, &meeting.participants);

        // A degraded pass derives nothing; superseding here would erase the
        // previous pass's entities with no replacement, so keep them.
        let superseded = if degraded {
            0
        } else {
            self.supersede_previous_batch(meeting_id).await
        };

        let batch = Uuid::new_v4().to_string();
        let mut decisions_created = 0;
        for draft in decision_drafts {
            let decision = Decision {
                id: None,
                meeting_id,
                description: draft.description,
                owner: draft.owner,
                decided_at: draft.decided_at,
                context: draft.context,
                derivation_batch: Some(batch.clone()),
            };
            match self.storage.create_decision(&decision).await {
                Ok(_) => decisions_created += 1,
                Err(e) => {
                    // best-effort: one failed insert must not abort the rest
                    log::error!(
                        "Failed to persist derived decision for meeting {}: {}",
                        meeting_id,
                        e
                    );
                }
            }
        }

        let mut action_items_created = 0;
        for draft in action_drafts {
            let item = ActionItem {
                id: None,
                meeting_id,
                task: draft.task,
                assignee: draft.assignee,
                deadline: draft.deadline,
                priority: draft.priority,
                status: draft.status,
                notes: Some(draft.notes),
                derivation_batch: Some(batch.clone()),
            };
            match self.storage.create_action_item(&item).await {
                Ok(_) => {
                    action_items_created += 1;
                    if let Some(notifier) = &self.notifier {
                        if let Err(e) = notifier.action_item_created(&meeting, &item).await {
                            log::warn!("Action-item notification failed: {}", e);
                        }
                    }
                }
                Err(e) => {
                    log::error!(
                        "Failed to persist derived action item for meeting {}: {}",
                        meeting_id,
                        e
                    );
                }
            }
        }

        meeting.analysis_state = if degraded {
            AnalysisState::AnalysisFailed
        } else {
            AnalysisState::Summarized
        };
        self.storage.update_meeting(&meeting).await?;

        log::info!(
            "Analysis pass for meeting {} complete: {} decisions, {} action items, {} superseded, degraded={}",
            meeting_id,
            decisions_created,
            action_items_created,
            superseded,
            degraded
        );

        Ok(AnalysisOutcome {
            meeting_id,
            summary_id,
            decisions_created,
            action_items_created,
            superseded,
            degraded,
        })
    }

    /// Change an action item's status, notifying on completion.
    pub async fn set_action_item_status(
        &self,
        meeting_id: i64,
        item_id: i64,
        status: ActionStatus,
    ) -> Result<()> {
        let meeting = self
            .storage
            .get_meeting(meeting_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("meeting {}", meeting_id)))?;

        self.storage.update_action_item_status(item_id, status).await?;

        if status == ActionStatus::Completed {
            if let Some(notifier) = &self.notifier {
                let items = self.storage.action_items_by_meeting(meeting_id).await?;
                if let Some(item) = items.iter().find(|i| i.id == Some(item_id)) {
                    if let Err(e) = notifier.action_item_completed(&meeting, item).await {
                        log::warn!("Completion notification failed: {}", e);
                    }
                }
            }
        }

        Ok(())
    }

    /// Mark the meeting AnalysisFailed before an error propagates, so it
    /// never sticks in Analyzing.
    async fn record_failed_state(&self, meeting: &mut Meeting) {
        meeting.analysis_state = AnalysisState::AnalysisFailed;
        if let Err(e) = self.storage.update_meeting(meeting).await {
            log::error!(
                "Failed to record analysis failure for meeting {:?}: {}",
                meeting.id,
                e
            );
        }
    }

    async fn supersede_previous_batch(&self, meeting_id: i64) -> usize {
        let mut superseded = 0;
        match self.storage.delete_derived_decisions(meeting_id).await {
            Ok(removed) => superseded += removed,
            Err(e) => log::error!(
                "Failed to supersede derived decisions for meeting {}: {}",
                meeting_id,
                e
            ),
        }
        match self.storage.delete_derived_action_items(meeting_id).await {
            Ok(removed) => superseded += removed,
            Err(e) => log::error!(
                "Failed to supersede derived action items for meeting {}: {}",
                meeting_id,
                e
            ),
        }
        superseded
    }
}
