//! FFmpeg CLI wrapper and voice-activity analysis for audio segmentation.
//!
//! This crate provides:
//! - FFmpeg/FFprobe invocation with bounded execution
//! - Audio duration and stream probing
//! - Loudness statistics extraction with a synthetic fallback
//! - Volume-threshold speech detection and segmentation-point refinement
//! - A fixed-length time slicer as the terminal fallback

pub mod command;
pub mod error;
pub mod probe;
pub mod stats;
pub mod vad;

pub use command::{check_ffmpeg, check_ffprobe, create_ffmpeg_command, run_with_timeout};
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_audio, AudioInfo};
pub use stats::{collect_audio_stats, synthetic_stats};
pub use vad::{
    analyze_audio_segments, basic_time_segments, detect_speech_segments, process_audio_with_vad,
    recommend_cut_points, VadConfig,
};
