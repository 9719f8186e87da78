//! Analysis entry points gluing extraction to detection.

use std::path::Path;

use tracing::{debug, warn};

use revoice_models::{SegmentationAnalysis, SpeechSegment};

use crate::error::MediaResult;
use crate::probe::probe_audio;
use crate::stats::collect_audio_stats;

use super::config::VadConfig;
use super::detector::detect_speech_segments;
use super::refine::recommend_cut_points;
use super::slicer::basic_time_segments;

/// Analyze a file into speech segments with derived aggregates.
///
/// The statistics extractor recovers from its own failures by fabricating
/// samples, so this rejects only when duration probing fails entirely.
pub async fn analyze_audio_segments(
    path: impl AsRef<Path>,
    config: &VadConfig,
) -> MediaResult<SegmentationAnalysis> {
    let path = path.as_ref();

    let info = probe_audio(path).await?;
    let samples = collect_audio_stats(path).await?;
    let segments = detect_speech_segments(&samples, config);

    debug!(
        path = %path.display(),
        duration = info.duration,
        samples = samples.len(),
        segments = segments.len(),
        "Audio segmentation analysis complete"
    );

    let mut analysis = SegmentationAnalysis::from_segments(segments, info.duration);
    analysis.recommended_cuts =
        recommend_cut_points(&analysis.segments, config.target_segment_secs);
    Ok(analysis)
}

/// Produce a non-empty segment list for a file.
///
/// Runs the full detector pipeline and falls back to fixed-length time
/// slicing when analysis fails or detects nothing. Only a failed duration
/// probe can surface as an error.
pub async fn process_audio_with_vad(
    path: impl AsRef<Path>,
    config: &VadConfig,
) -> MediaResult<Vec<SpeechSegment>> {
    let path = path.as_ref();

    match analyze_audio_segments(path, config).await {
        Ok(analysis) if !analysis.is_empty() => Ok(analysis.segments),
        Ok(_) => {
            debug!(
                path = %path.display(),
                "No speech detected, falling back to fixed-length segments"
            );
            fallback_segments(path).await
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Segmentation analysis failed, falling back to fixed-length segments"
            );
            fallback_segments(path).await
        }
    }
}

async fn fallback_segments(path: &Path) -> MediaResult<Vec<SpeechSegment>> {
    let duration = crate::probe::get_duration(path).await?;
    Ok(basic_time_segments(duration))
}
