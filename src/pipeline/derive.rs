//! Entity derivation heuristics
//!
//! Deterministic extraction of decision and action-item drafts from a
//! structured summary. No NLP here: classification is an explicit keyword
//! predicate and attribution follows a fixed precedence chain.

use crate::domain::models::{ActionStatus, Priority, AUTO_GENERATED_NOTE};
use crate::domain::summary::{Attendee, SummaryRecord};
use chrono::{Duration, NaiveDate, Utc};

/// Substrings that mark an insight as decision-bearing
pub const DECISION_KEYWORDS: &[&str] = &[
    "decide",
    "agreed",
    "conclusion",
    "passed",
    "requested",
    "ownership",
    "priority",
];

/// responsibleFor tags that make an attendee the default resource sharer
const RESOURCE_TAGS: &[&str] = &["resource", "shar", "document"];

/// An in-memory decision prior to persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionDraft {
    pub description: String,
    pub owner: String,
    pub context: String,
    pub decided_at: String,
}

/// An in-memory action item prior to persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemDraft {
    pub task: String,
    pub assignee: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub status: ActionStatus,
    pub notes: String,
}

/// Does this insight text read like a decision?
pub fn is_decision_bearing(text: &str) -> bool {
    let lower = text.to_lowercase();
    DECISION_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Derive decision drafts from a summary, one pass per discussion point.
///
/// A point with an explicit decisions array is taken at face value and its
/// insights are never scanned. Otherwise decision-bearing insights are
/// collected with owner attribution resolved by `resolve_owner`.
pub fn derive_decisions(summary: &SummaryRecord, participants: &[String]) -> Vec<DecisionDraft> {
    let decided_at = Utc::now().format("%Y-%m-%d %H:%M").to_string();
    let mut drafts = Vec::new();

    for point in &summary.key_discussion_points {
        if !point.decisions.is_empty() {
            for entry in &point.decisions {
                drafts.push(DecisionDraft {
                    description: entry.decision.clone(),
                    owner: entry.owner.clone().unwrap_or_else(|| "Team".to_string()),
                    context: point.topic.clone(),
                    decided_at: decided_at.clone(),
                });
            }
            continue;
        }

        for remark in &point.insights {
            let text = remark.text();
            if text.trim().is_empty() || !is_decision_bearing(text) {
                continue;
            }

            drafts.push(DecisionDraft {
                description: text.to_string(),
                owner: resolve_owner(text, remark.speaker(), participants),
                context: point.topic.clone(),
                decided_at: decided_at.clone(),
            });
        }
    }

    drafts
}

/// Resolve the owner label for a decision-bearing insight.
///
/// Precedence: a leading "Name:" prefix in the text overrides initials
/// derived from an attributed speaker (long-standing behavior, even where a
/// speaker is explicitly given); with neither, the first participant whose
/// name appears in the text wins; failing that, "Team".
fn resolve_owner(text: &str, speaker: Option<&str>, participants: &[String]) -> String {
    let mut owner = speaker.map(initials);

    if let Some(name) = leading_name_prefix(text) {
        owner = Some(name);
    }

    if let Some(owner) = owner {
        return owner;
    }

    participants
        .iter()
        .find(|participant| text.contains(participant.as_str()))
        .cloned()
        .unwrap_or_else(|| "Team".to_string())
}

/// Uppercased initials of each whitespace-delimited token ("John Doe" -> "JD")
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Capture a leading `Name:` prefix when the head looks like a person name
fn leading_name_prefix(text: &str) -> Option<String> {
    let (head, _) = text.split_once(':')?;
    let head = head.trim();
    if head.is_empty() || head.len() > 40 {
        return None;
    }
    let name_like = head
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '.' || c == '\'');
    if name_like && head.chars().any(|c| c.is_alphabetic()) {
        Some(head.to_string())
    } else {
        None
    }
}

/// Derive action-item drafts from the follow-up section.
///
/// Explicit task assignments take full precedence over resources; the two
/// branches are never merged within one pass.
pub fn derive_action_items(summary: &SummaryRecord, participants: &[String]) -> Vec<ActionItemDraft> {
    let deadline = Utc::now().date_naive() + Duration::days(7);
    let follow_up = &summary.follow_up_requirements;

    if !follow_up.task_assignments.is_empty() {
        return follow_up
            .task_assignments
            .iter()
            .map(|assignment| ActionItemDraft {
                task: assignment.task.clone(),
                assignee: assignment.assignee.clone(),
                deadline,
                priority: Priority::Medium,
                status: ActionStatus::Pending,
                notes: AUTO_GENERATED_NOTE.to_string(),
            })
            .collect();
    }

    follow_up
        .resources
        .iter()
        .map(|resource| ActionItemDraft {
            task: format!("Share resource: {}", resource),
            assignee: resolve_resource_assignee(&summary.attendees, participants),
            deadline,
            priority: Priority::Medium,
            status: ActionStatus::Pending,
            notes: AUTO_GENERATED_NOTE.to_string(),
        })
        .collect()
}

/// Pick who should share a resource: the attendee tagged with a
/// resource-like responsibility, else the first attendee, else the first
/// participant, else "Unassigned".
fn resolve_resource_assignee(attendees: &[Attendee], participants: &[String]) -> String {
    attendees
        .iter()
        .find(|attendee| {
            attendee.responsible_for.iter().any(|tag| {
                let lower = tag.to_lowercase();
                RESOURCE_TAGS.iter().any(|needle| lower.contains(needle))
            })
        })
        .or_else(|| attendees.first())
        .map(|attendee| attendee.name.clone())
        .or_else(|| participants.first().cloned())
        .unwrap_or_else(|| "Unassigned".to_string())
}
