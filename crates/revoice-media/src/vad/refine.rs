//! Segmentation-point refinement.
//!
//! Turns detected speech segments into an advisory list of cut-point times:
//! a cut shortly before speech that follows a long silence, and even-spaced
//! internal cuts through runs that exceed the target length. Callers may
//! use, ignore, or adjust these freely.

use revoice_models::SpeechSegment;

/// Lead-in kept before a speech onset when cutting in a silence gap (seconds).
const ONSET_LEAD_IN_SECS: f64 = 0.2;

/// Silence gaps of at least this fraction of the target length get a cut.
const GAP_CUT_FRACTION: f64 = 0.5;

/// Segments longer than this multiple of the target length are subdivided.
const SUBDIVIDE_FACTOR: f64 = 1.5;

/// Propose cut points for time-ordered speech segments.
///
/// The returned list always starts at 0.0 and is sorted ascending. Internal
/// subdivision is even-spaced by the target length, not pause detection.
pub fn recommend_cut_points(segments: &[SpeechSegment], target_segment_secs: f64) -> Vec<f64> {
    let mut cuts = vec![0.0];
    let mut current_time = 0.0_f64;

    for segment in segments {
        let gap = segment.start - current_time;
        if gap >= target_segment_secs * GAP_CUT_FRACTION {
            // Never cut behind a point already committed.
            let cut = (segment.start - ONSET_LEAD_IN_SECS).max(current_time);
            cuts.push(cut);
            current_time = cut;
        }

        if segment.duration > target_segment_secs * SUBDIVIDE_FACTOR {
            let mut t = segment.start + target_segment_secs;
            while t < segment.end {
                cuts.push(t);
                t += target_segment_secs;
            }
        }

        current_time = segment.end;
    }

    cuts.sort_by(f64::total_cmp);
    cuts
}
