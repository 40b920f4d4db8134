//! LLM service adapters
//!
//! Implementations of the SummarizerPort trait.

pub mod openai;

pub use openai::OpenAiSummarizer;
