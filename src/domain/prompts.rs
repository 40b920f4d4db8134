//! Prompt construction for the summarization service
//!
//! A single natural-language instruction embeds the meeting metadata and the
//! full canonical transcript, then enumerates the seven required output
//! sections and pins the response to one JSON object.

use crate::domain::models::Meeting;

const ANALYSIS_TEMPLATE: &str = r#"You are an expert meeting analyst. Analyze the following meeting transcript and produce a structured summary.

Meeting title: {title}
Date: {date}
Time: {start_time} - {end_time}
Duration: {duration}
Participants: {participants}
Location: {location}

Transcript:
{transcript}

Produce the following seven sections:
1. An executive summary of the meeting.
2. Attendees, each with name, inferred role, contributions, and the areas they are responsible for.
3. Key discussion points, each with topic, summary, contributors, insights, questions raised, and any decisions made (with owner).
4. Follow-up requirements: next meeting, deferred topics, resources to share, and task assignments (task plus assignee).
5. Sentiment analysis: overall tone, engagement level, and concerns raised.
6. Up to 5 transcript highlights, each with quote, speaker, timestamp, and significance.
7. A short narrative identifying the decision makers.

Respond with a single JSON object and nothing else, using exactly this shape:
{
  "executiveSummary": "...",
  "attendees": [{"name": "...", "role": "...", "contributions": "...", "responsibleFor": ["..."]}],
  "keyDiscussionPoints": [{"topic": "...", "summary": "...", "contributors": ["..."], "insights": [{"speaker": "...", "text": "..."}], "questions": [{"speaker": "...", "text": "..."}], "decisions": [{"decision": "...", "owner": "..."}]}],
  "followUpRequirements": {"nextMeeting": "...", "deferredTopics": ["..."], "resources": ["..."], "taskAssignments": [{"task": "...", "assignee": "..."}]},
  "sentimentAnalysis": {"tone": "...", "engagement": "...", "concerns": ["..."]},
  "transcriptHighlights": [{"quote": "...", "speaker": "...", "timestamp": "...", "significance": "..."}],
  "decisionMakers": "..."
}"#;

/// Build the analysis instruction for one meeting
pub fn analysis_prompt(meeting: &Meeting, transcript: &str) -> String {
    let duration = meeting
        .duration_minutes
        .map(|m| format!("{} minutes", m))
        .unwrap_or_else(|| "unknown".to_string());

    ANALYSIS_TEMPLATE
        .replace("{title}", &meeting.title)
        .replace("{date}", &meeting.date.to_string())
        .replace("{start_time}", meeting.start_time.as_deref().unwrap_or("unknown"))
        .replace("{end_time}", meeting.end_time.as_deref().unwrap_or("unknown"))
        .replace("{duration}", &duration)
        .replace("{participants}", &meeting.participants.join(", "))
        .replace("{location}", meeting.location.as_deref().unwrap_or("not specified"))
        .replace("{transcript}", transcript)
}
