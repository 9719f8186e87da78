//! Transcript reconciliation.
//!
//! Merges transcript spans with the probed audio duration: a transcript
//! that ends well before the end of the file gets one synthetic trailing
//! span so trailing audio is surfaced for manual review instead of being
//! silently dropped. Input spans are assumed well-formed and time-ordered;
//! they are never mutated or reordered.

use tracing::debug;

use revoice_models::{round_to_millis, ProcessingMethod, SegmentRecord, TranscriptSpan};

/// Gap between the last span and the file end that triggers a synthetic
/// tail, in seconds.
const MISSING_TAIL_THRESHOLD_SECS: f64 = 10.0;

/// Placeholder text for the synthetic tail span.
const MISSING_TAIL_PLACEHOLDER: &str = "[untranscribed audio - needs manual review]";

/// Neutral confidence-correlate for the synthetic tail span.
const MISSING_TAIL_NO_SPEECH_PROB: f64 = 0.5;

/// Map transcript spans to persisted segment records.
///
/// Appends at most one synthetic span when the transcript ends more than
/// 10 seconds before `total_duration`. Records carry sequential 1-based
/// numbers, millisecond-rounded times, trimmed text, and
/// `confidence = 1 - no_speech_prob`.
pub fn reconcile_transcript(
    spans: &[TranscriptSpan],
    total_duration: f64,
    method: ProcessingMethod,
) -> Vec<SegmentRecord> {
    let last_end = spans.last().map(|s| s.end).unwrap_or(0.0);
    let tail_gap = total_duration - last_end;

    let synthetic_tail = if tail_gap > MISSING_TAIL_THRESHOLD_SECS {
        debug!(
            last_end,
            total_duration, "Transcript ends early, appending synthetic tail span"
        );
        Some(TranscriptSpan::new(
            last_end,
            total_duration,
            MISSING_TAIL_PLACEHOLDER,
            MISSING_TAIL_NO_SPEECH_PROB,
        ))
    } else {
        None
    };

    spans
        .iter()
        .chain(synthetic_tail.iter())
        .enumerate()
        .map(|(i, span)| SegmentRecord {
            segment_number: (i + 1) as u32,
            start_time: round_to_millis(span.start),
            end_time: round_to_millis(span.end),
            transcription: span.text.trim().to_string(),
            confidence: 1.0 - span.no_speech_prob,
            processing_method: method,
        })
        .collect()
}
