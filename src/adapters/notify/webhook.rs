//! Chat webhook notifier
//!
//! Posts a small JSON payload to a configured webhook URL when action items
//! are created or completed. Delivery is best-effort; callers log failures
//! and never propagate them.

use crate::domain::models::{ActionItem, Meeting};
use crate::error::Result;
use crate::ports::notifier::NotifierPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Webhook-backed notifier
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    event: &'a str,
    meeting: &'a str,
    task: &'a str,
    assignee: &'a str,
    deadline: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, url }
    }

    async fn post(&self, event: &str, meeting: &Meeting, item: &ActionItem) -> Result<()> {
        let payload = WebhookPayload {
            event,
            meeting: &meeting.title,
            task: &item.task,
            assignee: &item.assignee,
            deadline: item.deadline.to_string(),
        };

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        log::info!("Delivered '{}' notification for task '{}'", event, item.task);
        Ok(())
    }
}

#[async_trait]
impl NotifierPort for WebhookNotifier {
    async fn action_item_created(&self, meeting: &Meeting, item: &ActionItem) -> Result<()> {
        self.post("action_item_created", meeting, item).await
    }

    async fn action_item_completed(&self, meeting: &Meeting, item: &ActionItem) -> Result<()> {
        self.post("action_item_completed", meeting, item).await
    }
}
