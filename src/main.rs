//! Command-line driver for the analysis pipeline
//!
//! Usage: minute-scribe <transcript-file> [meeting-id]
//!
//! Ingests the file (creating a meeting unless an id is given), then runs an
//! analysis pass when a summarization credential is configured.

use anyhow::{bail, Context};
use minute_scribe::adapters::notify::WebhookNotifier;
use minute_scribe::adapters::services::llm::OpenAiSummarizer;
use minute_scribe::adapters::storage::SqliteStorage;
use minute_scribe::config::AppConfig;
use minute_scribe::pipeline::{AnalysisPipeline, TranscriptUpload};
use minute_scribe::ports::{StoragePort, SummarizerPort};
use std::path::Path;
use std::sync::Arc;

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("csv") => "text/csv",
        Some("pdf") => "application/pdf",
        Some("doc") | Some("docx") => "application/msword",
        _ => "text/plain",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(file_arg) = args.next() else {
        bail!("usage: minute-scribe <transcript-file> [meeting-id]");
    };
    let meeting_id: Option<i64> = match args.next() {
        Some(arg) => Some(arg.parse().context("meeting-id must be an integer")?),
        None => None,
    };

    let config = AppConfig::from_env();

    let storage = SqliteStorage::new(config.db_path.clone())?;
    storage.run_migrations()?;
    let storage: Arc<SqliteStorage> = Arc::new(storage);

    let summarizer = Arc::new(OpenAiSummarizer::new(config.summarizer.clone())?);
    let configured = summarizer.is_configured();

    let mut pipeline = AnalysisPipeline::new(storage.clone(), summarizer);
    if let Some(url) = config.webhook_url.clone() {
        pipeline = pipeline.with_notifier(Arc::new(WebhookNotifier::new(url)));
    }

    let path = Path::new(&file_arg);
    let upload = TranscriptUpload {
        bytes: std::fs::read(path).with_context(|| format!("reading {}", file_arg))?,
        content_type: content_type_for(path).to_string(),
        filename: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&file_arg)
            .to_string(),
    };

    let id = pipeline.ingest_transcript(meeting_id, &upload).await?;
    println!("Transcript stored for meeting {}", id);

    if !configured {
        log::warn!("No summarization credential configured; skipping analysis");
        println!("Set OPENAI_API_KEY to run the analysis pass.");
        return Ok(());
    }

    let outcome = pipeline.analyze_meeting(id).await?;
    if outcome.degraded {
        println!("Analysis degraded to a placeholder summary.");
    }

    if let Some(summary) = storage.summary_by_meeting(id).await? {
        println!("\nExecutive summary:\n{}", summary.record.executive_summary);
    }

    let decisions = storage.decisions_by_meeting(id).await?;
    println!("\nDecisions ({}):", decisions.len());
    for decision in decisions {
        println!("  - {} [owner: {}]", decision.description, decision.owner);
    }

    let items = storage.action_items_by_meeting(id).await?;
    println!("\nAction items ({}):", items.len());
    for item in items {
        println!(
            "  - {} [assignee: {}, due: {}]",
            item.task, item.assignee, item.deadline
        );
    }

    Ok(())
}
