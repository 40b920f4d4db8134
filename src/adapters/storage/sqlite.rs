/// SQLite storage adapter
///
/// Implements StoragePort for SQLite database operations.
use crate::domain::models::{
    ActionItem, ActionStatus, AnalysisState, Decision, Meeting, Priority,
};
use crate::domain::summary::{StoredSummary, SummaryRecord};
use crate::error::{AppError, Result};
use crate::ports::storage::StoragePort;
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// SQLite storage implementation
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Create a new SQLite storage with the given database path
    pub fn new(db_path: PathBuf) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        // Enable foreign keys
        conn.execute("PRAGMA foreign_keys = ON", [])?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run database migrations
    pub fn run_migrations(&self) -> Result<()> {
        use rusqlite_migration::{Migrations, M};

        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../../migrations/001_initial.sql"
        ))]);

        let mut conn = self.conn.lock().unwrap();
        migrations
            .to_latest(&mut conn)
            .map_err(|e| AppError::Database(rusqlite::Error::ToSqlConversionFailure(Box::new(e))))?;

        Ok(())
    }

    fn require_meeting(conn: &Connection, meeting_id: i64) -> Result<()> {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT id FROM meetings WHERE id = ?1",
                params![meeting_id],
                |row| row.get(0),
            )
            .optional()?;

        match exists {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("meeting {}", meeting_id))),
        }
    }
}

fn meeting_from_row(row: &Row<'_>) -> rusqlite::Result<Meeting> {
    let date_str: String = row.get(2)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let participants_json: String = row.get(7)?;
    let participants: Vec<String> = serde_json::from_str(&participants_json).unwrap_or_default();

    let state_str: String = row.get(10)?;

    Ok(Meeting {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        date,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
        duration_minutes: row.get(5)?,
        location: row.get(6)?,
        participants,
        transcript: row.get(8)?,
        transcript_source: row.get(9)?,
        analysis_state: AnalysisState::parse(&state_str),
        created_at: row.get(11)?,
    })
}

fn decision_from_row(row: &Row<'_>) -> rusqlite::Result<Decision> {
    Ok(Decision {
        id: Some(row.get(0)?),
        meeting_id: row.get(1)?,
        description: row.get(2)?,
        owner: row.get(3)?,
        decided_at: row.get(4)?,
        context: row.get(5)?,
        derivation_batch: row.get(6)?,
    })
}

fn action_item_from_row(row: &Row<'_>) -> rusqlite::Result<ActionItem> {
    let deadline_str: String = row.get(4)?;
    let deadline = NaiveDate::parse_from_str(&deadline_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let priority_str: String = row.get(5)?;
    let status_str: String = row.get(6)?;

    Ok(ActionItem {
        id: Some(row.get(0)?),
        meeting_id: row.get(1)?,
        task: row.get(2)?,
        assignee: row.get(3)?,
        deadline,
        priority: Priority::parse(&priority_str),
        status: ActionStatus::parse(&status_str),
        notes: row.get(7)?,
        derivation_batch: row.get(8)?,
    })
}

const MEETING_COLUMNS: &str = "id, title, date, start_time, end_time, duration_minutes, location, \
                               participants, transcript, transcript_source, analysis_state, created_at";

#[async_trait]
impl StoragePort for SqliteStorage {
    async fn create_meeting(&self, meeting: &Meeting) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO meetings (title, date, start_time, end_time, duration_minutes, location,
                                   participants, transcript, transcript_source, analysis_state, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                meeting.title,
                meeting.date.to_string(),
                meeting.start_time,
                meeting.end_time,
                meeting.duration_minutes,
                meeting.location,
                serde_json::to_string(&meeting.participants)?,
                meeting.transcript,
                meeting.transcript_source,
                meeting.analysis_state.to_string(),
                meeting.created_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn get_meeting(&self, id: i64) -> Result<Option<Meeting>> {
        let conn = self.conn.lock().unwrap();
        let meeting = conn
            .query_row(
                &format!("SELECT {} FROM meetings WHERE id = ?1", MEETING_COLUMNS),
                params![id],
                meeting_from_row,
            )
            .optional()?;
        Ok(meeting)
    }

    async fn list_meetings(&self, limit: Option<i32>, offset: Option<i32>) -> Result<Vec<Meeting>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM meetings ORDER BY date DESC, id DESC LIMIT ?1 OFFSET ?2",
            MEETING_COLUMNS
        ))?;

        let rows = stmt.query_map(
            params![limit.unwrap_or(100), offset.unwrap_or(0)],
            meeting_from_row,
        )?;

        let mut meetings = Vec::new();
        for meeting_result in rows {
            meetings.push(meeting_result?);
        }

        Ok(meetings)
    }

    async fn update_meeting(&self, meeting: &Meeting) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE meetings SET title = ?1, date = ?2, start_time = ?3, end_time = ?4,
                                 duration_minutes = ?5, location = ?6, participants = ?7,
                                 transcript = ?8, transcript_source = ?9, analysis_state = ?10
             WHERE id = ?11",
            params![
                meeting.title,
                meeting.date.to_string(),
                meeting.start_time,
                meeting.end_time,
                meeting.duration_minutes,
                meeting.location,
                serde_json::to_string(&meeting.participants)?,
                meeting.transcript,
                meeting.transcript_source,
                meeting.analysis_state.to_string(),
                meeting.id,
            ],
        )?;
        Ok(())
    }

    async fn delete_meeting(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM meetings WHERE id = ?1", params![id])?;
        Ok(())
    }

    async fn create_summary(&self, meeting_id: i64, record: &SummaryRecord) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        Self::require_meeting(&conn, meeting_id)?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM summaries WHERE meeting_id = ?1",
                params![meeting_id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(AppError::DuplicateSummary(meeting_id));
        }

        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO summaries (meeting_id, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![meeting_id, serde_json::to_string(record)?, now],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn upsert_summary(&self, meeting_id: i64, record: &SummaryRecord) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        Self::require_meeting(&conn, meeting_id)?;

        // The UNIQUE constraint on meeting_id makes this a single atomic
        // statement; two racing analysis passes cannot end up with two rows.
        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO summaries (meeting_id, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(meeting_id) DO UPDATE SET
                 content = excluded.content,
                 updated_at = excluded.updated_at",
            params![meeting_id, serde_json::to_string(record)?, now],
        )?;

        let id: i64 = conn.query_row(
            "SELECT id FROM summaries WHERE meeting_id = ?1",
            params![meeting_id],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    async fn summary_by_meeting(&self, meeting_id: i64) -> Result<Option<StoredSummary>> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(i64, String, i64, i64)> = conn
            .query_row(
                "SELECT id, content, created_at, updated_at FROM summaries WHERE meeting_id = ?1",
                params![meeting_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        match row {
            Some((id, content, created_at, updated_at)) => Ok(Some(StoredSummary {
                id,
                meeting_id,
                record: serde_json::from_str(&content)?,
                created_at,
                updated_at,
            })),
            None => Ok(None),
        }
    }

    async fn delete_summary(&self, meeting_id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM summaries WHERE meeting_id = ?1",
            params![meeting_id],
        )?;
        Ok(())
    }

    async fn create_decision(&self, decision: &Decision) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        Self::require_meeting(&conn, decision.meeting_id)?;

        conn.execute(
            "INSERT INTO decisions (meeting_id, description, owner, decided_at, context, derivation_batch)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                decision.meeting_id,
                decision.description,
                decision.owner,
                decision.decided_at,
                decision.context,
                decision.derivation_batch,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn decisions_by_meeting(&self, meeting_id: i64) -> Result<Vec<Decision>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, meeting_id, description, owner, decided_at, context, derivation_batch
             FROM decisions WHERE meeting_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![meeting_id], decision_from_row)?;

        let mut decisions = Vec::new();
        for decision_result in rows {
            decisions.push(decision_result?);
        }

        Ok(decisions)
    }

    async fn delete_derived_decisions(&self, meeting_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM decisions WHERE meeting_id = ?1 AND derivation_batch IS NOT NULL",
            params![meeting_id],
        )?;
        Ok(removed)
    }

    async fn create_action_item(&self, item: &ActionItem) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        Self::require_meeting(&conn, item.meeting_id)?;

        conn.execute(
            "INSERT INTO action_items (meeting_id, task, assignee, deadline, priority, status, notes, derivation_batch)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.meeting_id,
                item.task,
                item.assignee,
                item.deadline.to_string(),
                item.priority.to_string(),
                item.status.to_string(),
                item.notes,
                item.derivation_batch,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn action_items_by_meeting(&self, meeting_id: i64) -> Result<Vec<ActionItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, meeting_id, task, assignee, deadline, priority, status, notes, derivation_batch
             FROM action_items WHERE meeting_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![meeting_id], action_item_from_row)?;

        let mut items = Vec::new();
        for item_result in rows {
            items.push(item_result?);
        }

        Ok(items)
    }

    async fn update_action_item_status(&self, id: i64, status: ActionStatus) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE action_items SET status = ?1 WHERE id = ?2",
            params![status.to_string(), id],
        )?;
        if updated == 0 {
            return Err(AppError::NotFound(format!("action item {}", id)));
        }
        Ok(())
    }

    async fn delete_derived_action_items(&self, meeting_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM action_items WHERE meeting_id = ?1 AND derivation_batch IS NOT NULL",
            params![meeting_id],
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AUTO_GENERATED_NOTE;

    fn test_storage() -> (SqliteStorage, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("test.db")).unwrap();
        storage.run_migrations().unwrap();
        (storage, dir)
    }

    fn sample_record(text: &str) -> SummaryRecord {
        let mut record = SummaryRecord::placeholder("test");
        record.executive_summary = text.to_string();
        record
    }

    #[tokio::test]
    async fn test_meeting_round_trip() {
        let (storage, _dir) = test_storage();

        let mut meeting = Meeting::new("Planning".to_string());
        meeting.add_participant("Alice".to_string());
        meeting.add_participant("Bob".to_string());
        meeting.attach_transcript("[00:01] Alice: hi".to_string(), Some("plan.csv".to_string()));

        let id = storage.create_meeting(&meeting).await.unwrap();
        let loaded = storage.get_meeting(id).await.unwrap().unwrap();

        assert_eq!(loaded.title, "Planning");
        assert_eq!(loaded.participants, vec!["Alice", "Bob"]);
        assert_eq!(loaded.analysis_state, AnalysisState::TranscriptStored);
        assert_eq!(loaded.transcript_source.as_deref(), Some("plan.csv"));
    }

    #[tokio::test]
    async fn test_get_missing_meeting_is_none() {
        let (storage, _dir) = test_storage();
        assert!(storage.get_meeting(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_summary_rejects_duplicates() {
        let (storage, _dir) = test_storage();
        let id = storage
            .create_meeting(&Meeting::new("M".to_string()))
            .await
            .unwrap();

        storage.create_summary(id, &sample_record("first")).await.unwrap();
        let err = storage
            .create_summary(id, &sample_record("second"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateSummary(m) if m == id));
    }

    #[tokio::test]
    async fn test_upsert_summary_keeps_one_row() {
        let (storage, _dir) = test_storage();
        let id = storage
            .create_meeting(&Meeting::new("M".to_string()))
            .await
            .unwrap();

        let first = storage.upsert_summary(id, &sample_record("first")).await.unwrap();
        let second = storage.upsert_summary(id, &sample_record("second")).await.unwrap();
        assert_eq!(first, second);

        let stored = storage.summary_by_meeting(id).await.unwrap().unwrap();
        assert_eq!(stored.record.executive_summary, "second");
    }

    #[tokio::test]
    async fn test_decision_requires_existing_meeting() {
        let (storage, _dir) = test_storage();

        let decision = Decision {
            id: None,
            meeting_id: 999,
            description: "ship it".to_string(),
            owner: "Team".to_string(),
            decided_at: "2026-01-01 10:00".to_string(),
            context: "Release".to_string(),
            derivation_batch: None,
        };

        let err = storage.create_decision(&decision).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_derived_keeps_manual_rows() {
        let (storage, _dir) = test_storage();
        let id = storage
            .create_meeting(&Meeting::new("M".to_string()))
            .await
            .unwrap();

        let mut derived = Decision {
            id: None,
            meeting_id: id,
            description: "derived".to_string(),
            owner: "Team".to_string(),
            decided_at: "2026-01-01 10:00".to_string(),
            context: "Topic".to_string(),
            derivation_batch: Some("batch-1".to_string()),
        };
        storage.create_decision(&derived).await.unwrap();

        derived.description = "manual".to_string();
        derived.derivation_batch = None;
        storage.create_decision(&derived).await.unwrap();

        let removed = storage.delete_derived_decisions(id).await.unwrap();
        assert_eq!(removed, 1);

        let remaining = storage.decisions_by_meeting(id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].description, "manual");
    }

    #[tokio::test]
    async fn test_action_item_round_trip_and_status_update() {
        let (storage, _dir) = test_storage();
        let id = storage
            .create_meeting(&Meeting::new("M".to_string()))
            .await
            .unwrap();

        let item = ActionItem {
            id: None,
            meeting_id: id,
            task: "Draft RFC".to_string(),
            assignee: "Sam".to_string(),
            deadline: NaiveDate::from_ymd_opt(2026, 9, 6).unwrap(),
            priority: Priority::Medium,
            status: ActionStatus::Pending,
            notes: Some(AUTO_GENERATED_NOTE.to_string()),
            derivation_batch: Some("batch-1".to_string()),
        };

        let item_id = storage.create_action_item(&item).await.unwrap();
        storage
            .update_action_item_status(item_id, ActionStatus::Completed)
            .await
            .unwrap();

        let items = storage.action_items_by_meeting(id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, ActionStatus::Completed);
        assert_eq!(items[0].deadline, NaiveDate::from_ymd_opt(2026, 9, 6).unwrap());
        assert_eq!(items[0].notes.as_deref(), Some(AUTO_GENERATED_NOTE));
    }
}
