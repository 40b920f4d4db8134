/// Domain layer - core business models
///
/// These models are platform-agnostic and represent core business entities.
pub mod models;
pub mod prompts;
pub mod summary;

pub use models::{ActionItem, ActionStatus, AnalysisState, Decision, Meeting, Priority};
pub use summary::{
    Attendee, DecisionEntry, DiscussionPoint, FollowUp, Remark, Sentiment, StoredSummary,
    SummaryRecord, TaskAssignment, TranscriptHighlight,
};
