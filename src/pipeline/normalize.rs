//! Transcript normalization
//!
//! Converts an uploaded file into canonical transcript text plus an
//! extracted participant set. CSV exports (timestamp, speaker, text) become
//! `[timestamp] speaker: text` lines; anything else passes through as raw
//! decoded text with participants supplied externally.

use crate::error::{AppError, Result};

/// Upper bound for transcript uploads (10 MB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Media types accepted at the upload boundary
const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "text/plain",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/csv",
    "application/csv",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// A file received at the upload boundary
#[derive(Debug, Clone)]
pub struct TranscriptUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

/// The canonical output of normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTranscript {
    pub text: String,
    /// Distinct speaker names in first-seen order; empty for non-CSV input
    pub participants: Vec<String>,
    /// Human-readable title derived from the filename, CSV only
    pub derived_title: Option<String>,
}

/// Normalize an uploaded file into canonical transcript form
pub fn normalize_upload(upload: &TranscriptUpload) -> Result<NormalizedTranscript> {
    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "Transcript file exceeds the {} byte limit",
            MAX_UPLOAD_BYTES
        )));
    }

    if !is_allowed(&upload.content_type, &upload.filename) {
        return Err(AppError::UnsupportedFileType(upload.content_type.clone()));
    }

    let text = std::str::from_utf8(&upload.bytes).map_err(|_| {
        AppError::Read(format!(
            "'{}' could not be decoded as text",
            upload.filename
        ))
    })?;

    if is_csv(&upload.content_type, &upload.filename) {
        Ok(normalize_csv(text, &upload.filename))
    } else {
        Ok(NormalizedTranscript {
            text: text.to_string(),
            participants: Vec::new(),
            derived_title: None,
        })
    }
}

fn is_allowed(content_type: &str, filename: &str) -> bool {
    let ct = content_type.to_lowercase();
    ALLOWED_MEDIA_TYPES.iter().any(|allowed| ct.starts_with(allowed))
        || filename.to_lowercase().ends_with(".csv")
}

fn is_csv(content_type: &str, filename: &str) -> bool {
    let ct = content_type.to_lowercase();
    ct.contains("csv") || ct.contains("excel") || filename.to_lowercase().ends_with(".csv")
}

fn normalize_csv(text: &str, filename: &str) -> NormalizedTranscript {
    let mut lines = Vec::new();
    let mut participants: Vec<String> = Vec::new();
    let mut first_line = true;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if first_line {
            first_line = false;
            let lower = line.to_lowercase();
            if lower.contains("timestamp") || lower.contains("speaker") {
                continue;
            }
        }

        let fields = split_csv_line(line);
        if fields.len() < 3 {
            // not speaker-attributed, keep as-is
            lines.push(line.to_string());
            continue;
        }

        let timestamp = strip_quotes(&fields[0]);
        let speaker = strip_quotes(&fields[1]);
        // ragged trailing columns belong to the text, rejoin them
        let text_field = strip_quotes(&fields[2..].join(","));

        lines.push(format!("[{}] {}: {}", timestamp, speaker, text_field));

        if !speaker.is_empty() && speaker != "undefined" && !participants.contains(&speaker) {
            participants.push(speaker);
        }
    }

    NormalizedTranscript {
        text: lines.join("\n"),
        participants,
        derived_title: Some(title_from_filename(filename)),
    }
}

/// Split on commas that are not inside double quotes
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

fn strip_quotes(field: &str) -> String {
    field.trim().trim_matches('"').trim().to_string()
}

fn title_from_filename(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };
    stem.replace(['_', '-'], " ")
}
