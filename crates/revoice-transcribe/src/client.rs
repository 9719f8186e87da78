//! Transcription service client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use revoice_models::TranscriptResult;

use crate::error::{TranscribeError, TranscribeResult};
use crate::types::{TranscriptionOptions, WhisperResponse};

/// External speech-to-text collaborator contract.
///
/// The orchestration layer constructs one implementation at startup and
/// injects it wherever transcription is needed; implementations must not
/// hold per-call state.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a file into time-stamped spans.
    ///
    /// `use_vad` asks the service to pre-filter non-speech audio where it
    /// supports that; services without the capability ignore it.
    async fn transcribe_with_timestamps(
        &self,
        path: &Path,
        options: &TranscriptionOptions,
        use_vad: bool,
    ) -> TranscribeResult<TranscriptResult>;
}

/// Configuration for the Whisper HTTP client.
#[derive(Debug, Clone)]
pub struct WhisperClientConfig {
    /// Base URL of the transcription service
    pub base_url: String,
    /// Bearer token, if the service requires one
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for WhisperClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "whisper-1".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl WhisperClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WHISPER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            model: std::env::var("WHISPER_MODEL").unwrap_or_else(|_| "whisper-1".to_string()),
            timeout: Duration::from_secs(
                std::env::var("WHISPER_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }
}

/// Client for an OpenAI-compatible `audio/transcriptions` endpoint.
pub struct WhisperClient {
    http: Client,
    config: WhisperClientConfig,
}

impl WhisperClient {
    /// Create a new client.
    pub fn new(config: WhisperClientConfig) -> TranscribeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TranscribeError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> TranscribeResult<Self> {
        Self::new(WhisperClientConfig::from_env())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe_with_timestamps(
        &self,
        path: &Path,
        options: &TranscriptionOptions,
        use_vad: bool,
    ) -> TranscribeResult<TranscriptResult> {
        let url = self.endpoint();
        debug!(
            path = %path.display(),
            url = %url,
            use_vad,
            "Sending transcription request"
        );

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json");

        if use_vad {
            form = form.text("vad_filter", "true");
        }
        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }
        if let Some(prompt) = &options.prompt {
            form = form.text("prompt", prompt.clone());
        }
        if let Some(temperature) = options.temperature {
            form = form.text("temperature", temperature.to_string());
        }

        let mut request = self.http.post(&url).multipart(form);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::request_failed(format!(
                "transcription service returned {}: {}",
                status, body
            )));
        }

        let parsed: WhisperResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::InvalidResponse(e.to_string()))?;

        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_config_defaults() {
        let config = WhisperClientConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "whisper-1");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = WhisperClient::new(WhisperClientConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..WhisperClientConfig::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/audio/transcriptions");
    }

    #[tokio::test]
    async fn test_transcribe_parses_verbose_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "testing one two",
                "duration": 6.4,
                "segments": [
                    {"id": 0, "start": 0.0, "end": 3.1, "text": " testing one", "no_speech_prob": 0.02},
                    {"id": 1, "start": 3.1, "end": 6.4, "text": " two", "no_speech_prob": 0.3}
                ]
            })))
            .mount(&server)
            .await;

        let mut audio = tempfile::NamedTempFile::new().unwrap();
        audio.write_all(b"fake audio bytes").unwrap();

        let client = WhisperClient::new(WhisperClientConfig {
            base_url: server.uri(),
            ..WhisperClientConfig::default()
        })
        .unwrap();

        let result = client
            .transcribe_with_timestamps(audio.path(), &TranscriptionOptions::default(), true)
            .await
            .unwrap();

        assert_eq!(result.text, "testing one two");
        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.spans[0].end, 3.1);
    }

    #[tokio::test]
    async fn test_transcribe_surfaces_service_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut audio = tempfile::NamedTempFile::new().unwrap();
        audio.write_all(b"fake audio bytes").unwrap();

        let client = WhisperClient::new(WhisperClientConfig {
            base_url: server.uri(),
            ..WhisperClientConfig::default()
        })
        .unwrap();

        let result = client
            .transcribe_with_timestamps(audio.path(), &TranscriptionOptions::default(), false)
            .await;

        assert!(matches!(result, Err(TranscribeError::RequestFailed(_))));
    }
}
