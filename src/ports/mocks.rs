//! Mock implementations for testing

use crate::domain::models::{ActionItem, ActionStatus, Decision, Meeting};
use crate::domain::summary::{StoredSummary, SummaryRecord};
use crate::error::{AppError, Result};
use crate::ports::notifier::NotifierPort;
use crate::ports::storage::StoragePort;
use crate::ports::summarizer::SummarizerPort;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock storage implementation for testing
#[derive(Clone, Default)]
pub struct MockStorage {
    meetings: Arc<Mutex<HashMap<i64, Meeting>>>,
    summaries: Arc<Mutex<HashMap<i64, StoredSummary>>>,
    decisions: Arc<Mutex<Vec<Decision>>>,
    action_items: Arc<Mutex<Vec<ActionItem>>>,
    next_id: Arc<Mutex<i64>>,
    /// Number of upcoming create_decision calls that should fail
    pub fail_decision_creates: Arc<Mutex<usize>>,
    /// Number of upcoming upsert_summary calls that should fail
    pub fail_summary_upserts: Arc<Mutex<usize>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }

    fn require_meeting(&self, meeting_id: i64) -> Result<()> {
        if self.meetings.lock().unwrap().contains_key(&meeting_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("meeting {}", meeting_id)))
        }
    }
}

#[async_trait]
impl StoragePort for MockStorage {
    async fn create_meeting(&self, meeting: &Meeting) -> Result<i64> {
        let id = self.next_id();
        let mut m = meeting.clone();
        m.id = Some(id);
        self.meetings.lock().unwrap().insert(id, m);
        Ok(id)
    }

    async fn get_meeting(&self, id: i64) -> Result<Option<Meeting>> {
        Ok(self.meetings.lock().unwrap().get(&id).cloned())
    }

    async fn list_meetings(&self, limit: Option<i32>, offset: Option<i32>) -> Result<Vec<Meeting>> {
        let meetings = self.meetings.lock().unwrap();
        let mut list: Vec<_> = meetings.values().cloned().collect();
        list.sort_by_key(|m| m.id);

        let offset = offset.unwrap_or(0) as usize;
        let result = list.into_iter().skip(offset);
        if let Some(limit) = limit {
            Ok(result.take(limit as usize).collect())
        } else {
            Ok(result.collect())
        }
    }

    async fn update_meeting(&self, meeting: &Meeting) -> Result<()> {
        if let Some(id) = meeting.id {
            self.meetings.lock().unwrap().insert(id, meeting.clone());
        }
        Ok(())
    }

    async fn delete_meeting(&self, id: i64) -> Result<()> {
        self.meetings.lock().unwrap().remove(&id);
        self.summaries.lock().unwrap().remove(&id);
        self.decisions.lock().unwrap().retain(|d| d.meeting_id != id);
        self.action_items.lock().unwrap().retain(|a| a.meeting_id != id);
        Ok(())
    }

    async fn create_summary(&self, meeting_id: i64, record: &SummaryRecord) -> Result<i64> {
        self.require_meeting(meeting_id)?;
        let mut summaries = self.summaries.lock().unwrap();
        if summaries.contains_key(&meeting_id) {
            return Err(AppError::DuplicateSummary(meeting_id));
        }
        let id = self.next_id();
        let now = chrono::Utc::now().timestamp();
        summaries.insert(
            meeting_id,
            StoredSummary {
                id,
                meeting_id,
                record: record.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn upsert_summary(&self, meeting_id: i64, record: &SummaryRecord) -> Result<i64> {
        self.require_meeting(meeting_id)?;
        {
            let mut failures = self.fail_summary_upserts.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(AppError::Validation("injected upsert failure".to_string()));
            }
        }
        let mut summaries = self.summaries.lock().unwrap();
        let now = chrono::Utc::now().timestamp();
        if let Some(existing) = summaries.get_mut(&meeting_id) {
            existing.record = record.clone();
            existing.updated_at = now;
            return Ok(existing.id);
        }
        let id = self.next_id();
        summaries.insert(
            meeting_id,
            StoredSummary {
                id,
                meeting_id,
                record: record.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn summary_by_meeting(&self, meeting_id: i64) -> Result<Option<StoredSummary>> {
        Ok(self.summaries.lock().unwrap().get(&meeting_id).cloned())
    }

    async fn delete_summary(&self, meeting_id: i64) -> Result<()> {
        self.summaries.lock().unwrap().remove(&meeting_id);
        Ok(())
    }

    async fn create_decision(&self, decision: &Decision) -> Result<i64> {
        self.require_meeting(decision.meeting_id)?;
        {
            let mut failures = self.fail_decision_creates.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(AppError::Validation("injected decision failure".to_string()));
            }
        }
        let id = self.next_id();
        let mut d = decision.clone();
        d.id = Some(id);
        self.decisions.lock().unwrap().push(d);
        Ok(id)
    }

    async fn decisions_by_meeting(&self, meeting_id: i64) -> Result<Vec<Decision>> {
        Ok(self
            .decisions
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.meeting_id == meeting_id)
            .cloned()
            .collect())
    }

    async fn delete_derived_decisions(&self, meeting_id: i64) -> Result<usize> {
        let mut decisions = self.decisions.lock().unwrap();
        let before = decisions.len();
        decisions.retain(|d| d.meeting_id != meeting_id || d.derivation_batch.is_none());
        Ok(before - decisions.len())
    }

    async fn create_action_item(&self, item: &ActionItem) -> Result<i64> {
        self.require_meeting(item.meeting_id)?;
        let id = self.next_id();
        let mut a = item.clone();
        a.id = Some(id);
        self.action_items.lock().unwrap().push(a);
        Ok(id)
    }

    async fn action_items_by_meeting(&self, meeting_id: i64) -> Result<Vec<ActionItem>> {
        Ok(self
            .action_items
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.meeting_id == meeting_id)
            .cloned()
            .collect())
    }

    async fn update_action_item_status(&self, id: i64, status: ActionStatus) -> Result<()> {
        let mut items = self.action_items.lock().unwrap();
        match items.iter_mut().find(|a| a.id == Some(id)) {
            Some(item) => {
                item.status = status;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("action item {}", id))),
        }
    }

    async fn delete_derived_action_items(&self, meeting_id: i64) -> Result<usize> {
        let mut items = self.action_items.lock().unwrap();
        let before = items.len();
        items.retain(|a| a.meeting_id != meeting_id || a.derivation_batch.is_none());
        Ok(before - items.len())
    }
}

/// What the mock summarizer should do when called
#[derive(Clone)]
pub enum MockSummarizerBehavior {
    Succeed(SummaryRecord),
    Unavailable(String),
    Fail(String),
}

/// Mock summarizer with scripted behavior
pub struct MockSummarizer {
    behavior: Mutex<MockSummarizerBehavior>,
    pub calls: Arc<Mutex<usize>>,
}

impl MockSummarizer {
    pub fn succeeding(record: SummaryRecord) -> Self {
        Self {
            behavior: Mutex::new(MockSummarizerBehavior::Succeed(record)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            behavior: Mutex::new(MockSummarizerBehavior::Unavailable(reason.to_string())),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            behavior: Mutex::new(MockSummarizerBehavior::Fail(reason.to_string())),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn set_behavior(&self, behavior: MockSummarizerBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }
}

#[async_trait]
impl SummarizerPort for MockSummarizer {
    async fn summarize(&self, _transcript: &str, _meeting: &Meeting) -> Result<SummaryRecord> {
        *self.calls.lock().unwrap() += 1;
        match self.behavior.lock().unwrap().clone() {
            MockSummarizerBehavior::Succeed(record) => Ok(record),
            MockSummarizerBehavior::Unavailable(reason) => {
                Err(AppError::AnalysisUnavailable(reason))
            }
            MockSummarizerBehavior::Fail(reason) => Err(AppError::Analysis(reason)),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        !matches!(
            *self.behavior.lock().unwrap(),
            MockSummarizerBehavior::Unavailable(_)
        )
    }
}

/// Mock notifier that records events and can be made to fail
#[derive(Clone, Default)]
pub struct MockNotifier {
    pub created: Arc<Mutex<Vec<String>>>,
    pub completed: Arc<Mutex<Vec<String>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotifierPort for MockNotifier {
    async fn action_item_created(&self, _meeting: &Meeting, item: &ActionItem) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(AppError::Validation("injected notifier failure".to_string()));
        }
        self.created.lock().unwrap().push(item.task.clone());
        Ok(())
    }

    async fn action_item_completed(&self, _meeting: &Meeting, item: &ActionItem) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(AppError::Validation("injected notifier failure".to_string()));
        }
        self.completed.lock().unwrap().push(item.task.clone());
        Ok(())
    }
}
