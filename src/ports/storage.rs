/// Storage port trait
///
/// Defines the interface for database operations.
/// Implementation: SQLite adapter
use crate::domain::models::{ActionItem, ActionStatus, Decision, Meeting};
use crate::domain::summary::{StoredSummary, SummaryRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for storage operations
#[async_trait]
pub trait StoragePort: Send + Sync {
    // Meeting operations
    /// Create a new meeting
    async fn create_meeting(&self, meeting: &Meeting) -> Result<i64>;

    /// Get a meeting by ID
    async fn get_meeting(&self, id: i64) -> Result<Option<Meeting>>;

    /// List all meetings, optionally filtered
    async fn list_meetings(&self, limit: Option<i32>, offset: Option<i32>) -> Result<Vec<Meeting>>;

    /// Update a meeting
    async fn update_meeting(&self, meeting: &Meeting) -> Result<()>;

    /// Delete a meeting and all related data
    async fn delete_meeting(&self, id: i64) -> Result<()>;

    // Summary operations
    /// Create a summary; fails with DuplicateSummary if one already exists
    async fn create_summary(&self, meeting_id: i64, record: &SummaryRecord) -> Result<i64>;

    /// Atomically create or update the summary for a meeting.
    ///
    /// This is the path the pipeline uses: the at-most-one-summary rule is
    /// enforced by the store, not by a check-then-act in the caller.
    async fn upsert_summary(&self, meeting_id: i64, record: &SummaryRecord) -> Result<i64>;

    /// Get the summary for a meeting
    async fn summary_by_meeting(&self, meeting_id: i64) -> Result<Option<StoredSummary>>;

    /// Delete the summary for a meeting
    async fn delete_summary(&self, meeting_id: i64) -> Result<()>;

    // Decision operations
    /// Create a decision; the referenced meeting must exist
    async fn create_decision(&self, decision: &Decision) -> Result<i64>;

    /// Get decisions for a meeting
    async fn decisions_by_meeting(&self, meeting_id: i64) -> Result<Vec<Decision>>;

    /// Remove machine-derived decisions (rows carrying a derivation batch)
    /// ahead of a superseding analysis pass; returns the number removed
    async fn delete_derived_decisions(&self, meeting_id: i64) -> Result<usize>;

    // Action item operations
    /// Create an action item; the referenced meeting must exist
    async fn create_action_item(&self, item: &ActionItem) -> Result<i64>;

    /// Get action items for a meeting
    async fn action_items_by_meeting(&self, meeting_id: i64) -> Result<Vec<ActionItem>>;

    /// Update the status of an action item
    async fn update_action_item_status(&self, id: i64, status: ActionStatus) -> Result<()>;

    /// Remove machine-derived action items ahead of a superseding analysis
    /// pass; returns the number removed
    async fn delete_derived_action_items(&self, meeting_id: i64) -> Result<usize>;
}
