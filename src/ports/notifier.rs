/// Notification port trait
///
/// Optional chat-webhook delivery for action-item events. Failures here
/// must never fail the operation that triggered them; callers log and move on.
use crate::domain::models::{ActionItem, Meeting};
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for action-item notifications
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// An action item was created for a meeting
    async fn action_item_created(&self, meeting: &Meeting, item: &ActionItem) -> Result<()>;

    /// An action item transitioned to completed
    async fn action_item_completed(&self, meeting: &Meeting, item: &ActionItem) -> Result<()>;
}
