//! Transcript spans and the persisted segment record shape.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One time-stamped span of transcript text from the transcription service.
///
/// Spans are read-only input to reconciliation: the pipeline may append a
/// synthetic trailing span but never mutates existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSpan {
    /// Span start in seconds.
    pub start: f64,
    /// Span end in seconds.
    pub end: f64,
    /// Transcribed text for this span.
    pub text: String,
    /// Probability the span contains no speech, in [0, 1].
    #[serde(default)]
    pub no_speech_prob: f64,
}

impl TranscriptSpan {
    /// Create a span.
    pub fn new(start: f64, end: f64, text: impl Into<String>, no_speech_prob: f64) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            no_speech_prob,
        }
    }
}

/// Full result of one transcription call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptResult {
    /// Concatenated transcript text.
    pub text: String,
    /// Audio duration as reported by the transcriber, in seconds.
    pub duration: f64,
    /// Time-stamped spans in file order.
    pub spans: Vec<TranscriptSpan>,
}

/// How a segment's transcription was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMethod {
    /// Direct transcription of the whole file.
    Whisper,
    /// Transcription assisted by voice-activity segmentation.
    WhisperVad,
    /// Fixed-length fallback slicing, no transcription available.
    Fallback,
}

impl ProcessingMethod {
    /// Tag string as stored by the review layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whisper => "whisper",
            Self::WhisperVad => "whisper_vad",
            Self::Fallback => "fallback",
        }
    }
}

/// A segment in the shape the review layer persists.
///
/// Produced by reconciliation from transcript spans; times are rounded to
/// millisecond precision and text is trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SegmentRecord {
    /// Sequential 1-based position within the file.
    pub segment_number: u32,
    /// Start time in seconds, rounded to 3 decimal places.
    pub start_time: f64,
    /// End time in seconds, rounded to 3 decimal places.
    pub end_time: f64,
    /// Trimmed transcription text.
    pub transcription: String,
    /// Confidence correlate (`1 - no_speech_prob`), in [0, 1].
    pub confidence: f64,
    /// How this segment's transcription was produced.
    pub processing_method: ProcessingMethod,
}

/// Round seconds to millisecond precision.
pub fn round_to_millis(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}
