//! Fixed-length fallback time slicing.
//!
//! Terminal fallback when analysis fails or finds nothing usable: partition
//! the full duration into fixed windows so callers always receive a
//! non-empty, well-formed segment list covering the whole file.

use revoice_models::SpeechSegment;

/// Window length for fallback slicing, in seconds.
const FALLBACK_WINDOW_SECS: f64 = 5.0;

/// Confidence assigned to fallback segments.
const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Nominal volume assigned to fallback segments, in dB.
const FALLBACK_VOLUME_DB: f64 = -25.0;

/// Partition `[0, total_duration)` into fixed 5-second segments.
///
/// The final window is truncated to fit; there are no gaps or overlaps.
/// Returns an empty list only for a non-positive duration.
pub fn basic_time_segments(total_duration: f64) -> Vec<SpeechSegment> {
    let mut segments = Vec::new();
    let mut start = 0.0_f64;

    while start < total_duration {
        let end = (start + FALLBACK_WINDOW_SECS).min(total_duration);
        segments.push(SpeechSegment::new(
            start,
            end,
            FALLBACK_CONFIDENCE,
            FALLBACK_VOLUME_DB,
        ));
        start = end;
    }

    segments
}
