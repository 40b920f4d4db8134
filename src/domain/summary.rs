//! Structured meeting summary as returned by the summarization service
//!
//! Field names follow the external camelCase contract; the whole record is
//! parsed from a single JSON object. Insights and questions come in two
//! shapes (bare string or speaker-attributed object), modeled here as an
//! untagged enum instead of runtime type inspection.

use serde::{Deserialize, Serialize};

/// An insight or question within a discussion point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Remark {
    /// Legacy plain-string form
    Plain(String),
    /// Speaker-attributed form: `{"speaker": ..., "text": ...}` (the text
    /// key is sometimes emitted as "insight")
    Attributed {
        #[serde(default)]
        speaker: Option<String>,
        #[serde(alias = "insight")]
        text: String,
    },
}

impl Remark {
    pub fn text(&self) -> &str {
        match self {
            Remark::Plain(text) => text,
            Remark::Attributed { text, .. } => text,
        }
    }

    pub fn speaker(&self) -> Option<&str> {
        match self {
            Remark::Plain(_) => None,
            Remark::Attributed { speaker, .. } => speaker.as_deref(),
        }
    }
}

/// A decision explicitly called out by the summarization service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionEntry {
    #[serde(alias = "description")]
    pub decision: String,
    #[serde(default)]
    pub owner: Option<String>,
}

/// One topic of discussion within the meeting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionPoint {
    pub topic: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub insights: Vec<Remark>,
    #[serde(default)]
    pub questions: Vec<Remark>,
    #[serde(default)]
    pub decisions: Vec<DecisionEntry>,
}

/// An attendee descriptor inferred by the summarization service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub contributions: Option<String>,
    #[serde(default)]
    pub responsible_for: Vec<String>,
}

/// A task assignment surfaced in the follow-up section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskAssignment {
    pub task: String,
    pub assignee: String,
}

/// Follow-up requirements identified for the meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    #[serde(default)]
    pub next_meeting: Option<String>,
    #[serde(default)]
    pub deferred_topics: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub task_assignments: Vec<TaskAssignment>,
}

/// Overall sentiment of the meeting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentiment {
    pub tone: String,
    pub engagement: String,
    #[serde(default)]
    pub concerns: Vec<String>,
}

/// A notable quote pulled from the transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptHighlight {
    pub quote: String,
    pub speaker: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub significance: Option<String>,
}

/// The full structured summary for one meeting
///
/// Exactly one of these exists per meeting once analysis has run; the
/// storage layer enforces that with a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub executive_summary: String,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    pub key_discussion_points: Vec<DiscussionPoint>,
    pub follow_up_requirements: FollowUp,
    pub sentiment_analysis: Sentiment,
    pub transcript_highlights: Vec<TranscriptHighlight>,
    #[serde(default)]
    pub decision_makers: Option<String>,
}

impl SummaryRecord {
    /// Build a well-formed stand-in record for when analysis cannot run.
    ///
    /// Every required container is populated so the derivation engine can
    /// run unmodified against it, while the content stays deliberately
    /// free of decision keywords and task assignments so nothing is
    /// derived from it.
    pub fn placeholder(reason: &str) -> Self {
        Self {
            executive_summary: format!(
                "Automated analysis could not be completed: {}. This is a \
                 stand-in summary; re-run the analysis once the issue is \
                 resolved.",
                reason
            ),
            attendees: Vec::new(),
            key_discussion_points: vec![DiscussionPoint {
                topic: "Analysis status".to_string(),
                summary: reason.to_string(),
                contributors: Vec::new(),
                insights: Vec::new(),
                questions: Vec::new(),
                decisions: Vec::new(),
            }],
            follow_up_requirements: FollowUp {
                next_meeting: None,
                deferred_topics: vec!["Re-run the automated analysis".to_string()],
                resources: Vec::new(),
                task_assignments: Vec::new(),
            },
            sentiment_analysis: Sentiment {
                tone: "unavailable".to_string(),
                engagement: "unavailable".to_string(),
                concerns: Vec::new(),
            },
            transcript_highlights: vec![TranscriptHighlight {
                quote: "No highlights available".to_string(),
                speaker: "system".to_string(),
                timestamp: None,
                significance: None,
            }],
            decision_makers: None,
        }
    }
}

/// A summary record as persisted, with its row identity and timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSummary {
    pub id: i64,
    pub meeting_id: i64,
    pub record: SummaryRecord,
    pub created_at: i64,
    pub updated_at: i64,
}
