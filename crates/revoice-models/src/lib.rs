//! Shared data models for the Revoice segmentation backend.
//!
//! This crate provides Serde-serializable types for:
//! - Volume samples produced by audio analysis
//! - Detected speech segments and the aggregate analysis result
//! - Transcript spans returned by the transcription service
//! - Segment records in the shape the review layer persists

pub mod sample;
pub mod segment;
pub mod transcript;

// Re-export common types
pub use sample::AudioStatSample;
pub use segment::{SegmentationAnalysis, SpeechSegment};
pub use transcript::{
    round_to_millis, ProcessingMethod, SegmentRecord, TranscriptResult, TranscriptSpan,
};
