//! Volume-threshold speech segment detection.
//!
//! A single pass over time-ordered loudness samples with an open-segment
//! accumulator:
//!
//! ```text
//!   silence --(volume > threshold)--> open segment at sample time
//!   speech  --(volume <= threshold)-> look ahead up to N samples;
//!                                     speech returns within the gap
//!                                     budget? bridge : close segment
//! ```
//!
//! Closed candidates shorter than the configured minimum are discarded.

use revoice_models::{AudioStatSample, SpeechSegment};

use super::config::VadConfig;

/// Accumulator for the segment currently being built.
struct OpenSegment {
    start: f64,
    opening_volume: f64,
}

/// Detect speech segments in an ordered sample sequence.
///
/// Pure function: emits non-overlapping segments in time order. A segment
/// still open when the samples run out is closed at the last sample's time,
/// subject to the same minimum-duration filter.
pub fn detect_speech_segments(samples: &[AudioStatSample], config: &VadConfig) -> Vec<SpeechSegment> {
    let mut segments = Vec::new();
    let mut open: Option<OpenSegment> = None;

    for (i, sample) in samples.iter().enumerate() {
        let is_speech = sample.volume > config.speech_threshold_db;

        match (&open, is_speech) {
            (None, true) => {
                open = Some(OpenSegment {
                    start: sample.time,
                    opening_volume: sample.volume,
                });
            }
            (Some(_), false) => {
                if !speech_returns_within_gap(samples, i, config) {
                    if let Some(segment) = close_segment(open.take(), sample.time, config) {
                        segments.push(segment);
                    }
                }
                // Gap bridged: segment stays open across this silence.
            }
            _ => {}
        }
    }

    if let Some(last) = samples.last() {
        if let Some(segment) = close_segment(open.take(), last.time, config) {
            segments.push(segment);
        }
    }

    segments
}

/// Look ahead from the silence sample at `index` for a return to speech.
///
/// The window is a fixed count of samples; only candidates within the time
/// budget count as a bridgeable gap.
fn speech_returns_within_gap(
    samples: &[AudioStatSample],
    index: usize,
    config: &VadConfig,
) -> bool {
    let silence_time = samples[index].time;

    samples
        .iter()
        .skip(index + 1)
        .take(config.gap_lookahead_samples)
        .any(|s| {
            s.volume > config.speech_threshold_db
                && s.time - silence_time <= config.max_bridge_gap_secs
        })
}

/// Close an open segment at `end`, applying the minimum-duration filter.
fn close_segment(open: Option<OpenSegment>, end: f64, config: &VadConfig) -> Option<SpeechSegment> {
    let open = open?;
    let duration = end - open.start;
    if duration < config.min_segment_secs {
        return None;
    }

    Some(SpeechSegment::new(
        open.start,
        end,
        config.confidence_for_volume(open.opening_volume),
        open.opening_volume,
    ))
}
