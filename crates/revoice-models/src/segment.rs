//! Detected speech segments and the aggregate analysis result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contiguous run of detected speech.
///
/// Segments are emitted in non-overlapping, time-ordered sequence. The
/// detector discards any candidate shorter than its configured minimum
/// duration before the segment reaches callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechSegment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds (always greater than `start`).
    pub end: f64,
    /// Duration in seconds (`end - start`).
    pub duration: f64,
    /// Heuristic speech likelihood in [0, 1], derived from loudness.
    pub speech_confidence: f64,
    /// Level at the segment's opening sample, in decibels.
    pub volume: f64,
}

impl SpeechSegment {
    /// Create a segment, computing `duration` from the endpoints.
    pub fn new(start: f64, end: f64, speech_confidence: f64, volume: f64) -> Self {
        Self {
            start,
            end,
            duration: end - start,
            speech_confidence,
            volume,
        }
    }
}

/// Aggregate result of one segmentation pass over a file.
///
/// Recomputed on every call; persistence is the calling layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SegmentationAnalysis {
    /// Detected speech segments in time order.
    pub segments: Vec<SpeechSegment>,
    /// Sum of segment durations, in seconds.
    pub total_speech_time: f64,
    /// Fraction of the file classified as speech, in [0, 1].
    pub speech_to_silence_ratio: f64,
    /// Mean segment duration in seconds (0 when no segments were found).
    pub average_segment_length: f64,
    /// Advisory cut-point times in seconds, starting at 0.
    pub recommended_cuts: Vec<f64>,
}

impl SegmentationAnalysis {
    /// Build the aggregate from detected segments and the file duration.
    ///
    /// `recommended_cuts` is left empty; the refiner fills it in.
    pub fn from_segments(segments: Vec<SpeechSegment>, total_duration: f64) -> Self {
        let total_speech_time: f64 = segments.iter().map(|s| s.duration).sum();
        let speech_to_silence_ratio = if total_duration > 0.0 {
            (total_speech_time / total_duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let average_segment_length = if segments.is_empty() {
            0.0
        } else {
            total_speech_time / segments.len() as f64
        };

        Self {
            segments,
            total_speech_time,
            speech_to_silence_ratio,
            average_segment_length,
            recommended_cuts: Vec::new(),
        }
    }

    /// True when no speech was detected at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
