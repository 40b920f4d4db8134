/// Domain models for Minute Scribe
///
/// These models represent core business entities and are platform-agnostic.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker written into the notes field of machine-derived action items
pub const AUTO_GENERATED_NOTE: &str = "Auto-generated from meeting analysis";

/// Analysis lifecycle of a meeting transcript
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisState {
    NoTranscript,
    TranscriptStored,
    Analyzing,
    Summarized,
    AnalysisFailed,
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisState::NoTranscript => write!(f, "no_transcript"),
            AnalysisState::TranscriptStored => write!(f, "transcript_stored"),
            AnalysisState::Analyzing => write!(f, "analyzing"),
            AnalysisState::Summarized => write!(f, "summarized"),
            AnalysisState::AnalysisFailed => write!(f, "analysis_failed"),
        }
    }
}

impl AnalysisState {
    /// Parse the persisted label, falling back to NoTranscript
    pub fn parse(value: &str) -> Self {
        match value {
            "transcript_stored" => AnalysisState::TranscriptStored,
            "analyzing" => AnalysisState::Analyzing,
            "summarized" => AnalysisState::Summarized,
            "analysis_failed" => AnalysisState::AnalysisFailed,
            _ => AnalysisState::NoTranscript,
        }
    }
}

/// Represents a meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Option<i64>,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_minutes: Option<i64>,
    pub location: Option<String>,
    /// Unique participant names, in the order they were entered
    pub participants: Vec<String>,
    pub transcript: Option<String>,
    pub transcript_source: Option<String>,
    pub analysis_state: AnalysisState,
    pub created_at: i64,
}

impl Meeting {
    /// Creates a new meeting dated today
    pub fn new(title: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: None,
            title,
            date: now.date_naive(),
            start_time: None,
            end_time: None,
            duration_minutes: None,
            location: None,
            participants: Vec::new(),
            transcript: None,
            transcript_source: None,
            analysis_state: AnalysisState::NoTranscript,
            created_at: now.timestamp(),
        }
    }

    /// Add a participant, preserving first-seen order and skipping duplicates
    pub fn add_participant(&mut self, name: String) {
        if !name.is_empty() && !self.participants.contains(&name) {
            self.participants.push(name);
        }
    }

    /// Attach transcript text and record where it came from
    pub fn attach_transcript(&mut self, text: String, source: Option<String>) {
        self.transcript = Some(text);
        self.transcript_source = source;
        self.analysis_state = AnalysisState::TranscriptStored;
    }
}

/// Priority of an action item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl Priority {
    pub fn parse(value: &str) -> Self {
        match value {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

/// Completion status of an action item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Pending => write!(f, "pending"),
            ActionStatus::InProgress => write!(f, "in_progress"),
            ActionStatus::Completed => write!(f, "completed"),
        }
    }
}

impl ActionStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "in_progress" => ActionStatus::InProgress,
            "completed" => ActionStatus::Completed,
            _ => ActionStatus::Pending,
        }
    }
}

/// A decision extracted from a meeting summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id: Option<i64>,
    pub meeting_id: i64,
    pub description: String,
    /// Free-text name, initials, or the literal "Team"
    pub owner: String,
    /// Wall-clock label recorded at derivation time, not transcript-relative
    pub decided_at: String,
    /// The discussion topic this decision came out of
    pub context: String,
    /// Set on machine-derived rows; a re-analysis supersedes the whole batch
    pub derivation_batch: Option<String>,
}

/// A task assignment tracked against a meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: Option<i64>,
    pub meeting_id: i64,
    pub task: String,
    pub assignee: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub status: ActionStatus,
    pub notes: Option<String>,
    pub derivation_batch: Option<String>,
}
