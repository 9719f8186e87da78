//! Transcription request options and wire formats.

use serde::{Deserialize, Serialize};

use revoice_models::{TranscriptResult, TranscriptSpan};

/// Caller-supplied context for a transcription request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionOptions {
    /// ISO language hint (e.g. "en"). None lets the service detect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Context prompt carried from earlier segments of the same file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Sampling temperature for the service, if overridden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl TranscriptionOptions {
    /// Builder-style setter for the language hint.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder-style setter for the context prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

/// `verbose_json` response from an OpenAI-compatible endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct WhisperResponse {
    pub text: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub segments: Vec<WhisperSegment>,
}

/// One segment of a `verbose_json` response.
///
/// Token data and decoder internals the service reports are ignored; only
/// the fields reconciliation consumes are kept.
#[derive(Debug, Deserialize)]
pub(crate) struct WhisperSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub no_speech_prob: f64,
}

impl From<WhisperResponse> for TranscriptResult {
    fn from(response: WhisperResponse) -> Self {
        let spans = response
            .segments
            .into_iter()
            .map(|s| TranscriptSpan::new(s.start, s.end, s.text, s.no_speech_prob))
            .collect();

        TranscriptResult {
            text: response.text,
            duration: response.duration,
            spans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_json_parsing() {
        let json = r#"{
            "text": "hello world",
            "duration": 12.5,
            "segments": [
                {"id": 0, "start": 0.0, "end": 4.2, "text": " hello", "no_speech_prob": 0.01},
                {"id": 1, "start": 4.2, "end": 9.0, "text": " world", "no_speech_prob": 0.12}
            ]
        }"#;

        let response: WhisperResponse = serde_json::from_str(json).unwrap();
        let result: TranscriptResult = response.into();

        assert_eq!(result.text, "hello world");
        assert_eq!(result.duration, 12.5);
        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.spans[1].start, 4.2);
        assert!((result.spans[1].no_speech_prob - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"text": "short"}"#;
        let response: WhisperResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.duration, 0.0);
        assert!(response.segments.is_empty());
    }
}
