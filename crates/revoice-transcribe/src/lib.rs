//! Whisper transcription client and transcript reconciliation.
//!
//! This crate provides:
//! - The [`Transcriber`] trait, the contract the orchestration layer
//!   consumes for external speech-to-text services
//! - [`WhisperClient`], an HTTP client for OpenAI-compatible
//!   `audio/transcriptions` endpoints
//! - Reconciliation of transcript spans with the probed audio duration
//! - The enhanced transcription orchestration with its bounded
//!   VAD-assisted path

pub mod client;
pub mod enhanced;
pub mod error;
pub mod reconcile;
pub mod types;

pub use client::{Transcriber, WhisperClient, WhisperClientConfig};
pub use enhanced::enhanced_transcription;
pub use error::{TranscribeError, TranscribeResult};
pub use reconcile::reconcile_transcript;
pub use types::TranscriptionOptions;
