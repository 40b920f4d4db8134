//! Minute Scribe
//!
//! Ingests raw meeting transcripts (plain text or CSV exports), normalizes
//! them into speaker-attributed lines, delegates summarization to an external
//! LLM, and deterministically derives decisions and action items from the
//! structured result.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;

pub use error::{AppError, Result};
