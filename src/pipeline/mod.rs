/// Transcript analysis pipeline
///
/// normalize -> summarize -> derive -> persist, orchestrated per meeting.
pub mod derive;
pub mod normalize;
pub mod orchestrator;

pub use normalize::{normalize_upload, NormalizedTranscript, TranscriptUpload};
pub use orchestrator::{AnalysisOutcome, AnalysisPipeline};
