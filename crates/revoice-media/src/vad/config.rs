//! Configuration for voice activity detection.
//!
//! These parameters control how loudness samples are classified and merged
//! into speech segments. The defaults are tuned for recorded speech at the
//! extractor's half-second sampling cadence.

use serde::{Deserialize, Serialize};

/// Configuration for the volume-threshold speech detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VadConfig {
    /// Level above which a sample is classified as speech (dB).
    ///
    /// - Lower values (-45..-40): more sensitive, background noise may
    ///   register as speech
    /// - Default (-35): balanced for typical voice recordings
    /// - Higher values (-30..-25): only loud, confident speech
    pub speech_threshold_db: f64,

    /// Maximum silence gap that is bridged instead of closing a segment
    /// (seconds). Pauses shorter than this stay inside one segment.
    pub max_bridge_gap_secs: f64,

    /// Minimum duration for an emitted segment (seconds). Shorter
    /// candidates are discarded.
    pub min_segment_secs: f64,

    /// How many samples ahead the gap-bridging check looks.
    ///
    /// This is a count of samples, not a time span: at a lower sampling
    /// cadence the same count covers more wall-clock time and bridging
    /// becomes more permissive. Tune it together with the extractor's
    /// window length.
    pub gap_lookahead_samples: usize,

    /// Level mapped to confidence 0.0 (dB).
    pub quiet_floor_db: f64,

    /// Level mapped to confidence 1.0 (dB).
    pub loud_ceiling_db: f64,

    /// Target length used by the cut-point refiner (seconds).
    pub target_segment_secs: f64,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            speech_threshold_db: -35.0,
            max_bridge_gap_secs: 0.5,
            min_segment_secs: 1.0,
            gap_lookahead_samples: 10,
            quiet_floor_db: -60.0,
            loud_ceiling_db: -10.0,
            target_segment_secs: 5.0,
        }
    }
}

impl VadConfig {
    /// Builder-style setter for the speech threshold.
    pub fn with_threshold_db(mut self, db: f64) -> Self {
        self.speech_threshold_db = db;
        self
    }

    /// Builder-style setter for the maximum bridged gap.
    pub fn with_max_bridge_gap_secs(mut self, secs: f64) -> Self {
        self.max_bridge_gap_secs = secs;
        self
    }

    /// Builder-style setter for the minimum segment duration.
    pub fn with_min_segment_secs(mut self, secs: f64) -> Self {
        self.min_segment_secs = secs;
        self
    }

    /// Builder-style setter for the refiner's target segment length.
    pub fn with_target_segment_secs(mut self, secs: f64) -> Self {
        self.target_segment_secs = secs.max(f64::EPSILON);
        self
    }

    /// Map a level to a confidence score by linear normalization between
    /// the quiet floor and loud ceiling, clamped to [0, 1].
    pub fn confidence_for_volume(&self, volume_db: f64) -> f64 {
        let range = self.loud_ceiling_db - self.quiet_floor_db;
        if range <= 0.0 {
            return 0.0;
        }
        ((volume_db - self.quiet_floor_db) / range).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VadConfig::default();
        assert!((config.speech_threshold_db - (-35.0)).abs() < f64::EPSILON);
        assert!((config.max_bridge_gap_secs - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.gap_lookahead_samples, 10);
    }

    #[test]
    fn test_confidence_normalization() {
        let config = VadConfig::default();
        assert_eq!(config.confidence_for_volume(-60.0), 0.0);
        assert_eq!(config.confidence_for_volume(-10.0), 1.0);
        assert!((config.confidence_for_volume(-35.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_clamped_outside_band() {
        let config = VadConfig::default();
        assert_eq!(config.confidence_for_volume(-90.0), 0.0);
        assert_eq!(config.confidence_for_volume(0.0), 1.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = VadConfig::default()
            .with_threshold_db(-40.0)
            .with_min_segment_secs(0.5);
        assert!((config.speech_threshold_db - (-40.0)).abs() < f64::EPSILON);
        assert!((config.min_segment_secs - 0.5).abs() < f64::EPSILON);
    }
}
