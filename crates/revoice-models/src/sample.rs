//! Volume samples produced by the audio statistics extractor.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single loudness measurement at a point in time.
///
/// Samples are produced in monotonically increasing time order and consumed
/// once by the speech detector. They are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioStatSample {
    /// Position in the file, in seconds from the start.
    pub time: f64,
    /// Measured level in decibels (typically -60..0 for speech content).
    pub volume: f64,
}

impl AudioStatSample {
    /// Create a new sample.
    pub fn new(time: f64, volume: f64) -> Self {
        Self { time, volume }
    }
}
