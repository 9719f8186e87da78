//! Enhanced transcription orchestration.
//!
//! The VAD-assisted path is raced against a fixed timeout so a wedged
//! service call cannot hang a request. Any failure on that path falls back
//! to direct transcription; direct-path errors are wrapped and propagated.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use revoice_models::TranscriptResult;

use crate::client::Transcriber;
use crate::error::{TranscribeError, TranscribeResult};
use crate::types::TranscriptionOptions;

/// Bound on the VAD-assisted transcription attempt, in seconds.
const ENHANCED_TIMEOUT_SECS: u64 = 30;

/// Transcribe with VAD assistance, falling back to direct transcription.
pub async fn enhanced_transcription<T: Transcriber + ?Sized>(
    path: impl AsRef<Path>,
    transcriber: &T,
    options: &TranscriptionOptions,
) -> TranscribeResult<TranscriptResult> {
    let path = path.as_ref();

    let vad_attempt = tokio::time::timeout(
        Duration::from_secs(ENHANCED_TIMEOUT_SECS),
        transcriber.transcribe_with_timestamps(path, options, true),
    )
    .await;

    match vad_attempt {
        Ok(Ok(result)) => {
            debug!(
                path = %path.display(),
                spans = result.spans.len(),
                "VAD-assisted transcription succeeded"
            );
            Ok(result)
        }
        Ok(Err(e)) => {
            warn!(
                path = %path.display(),
                error = %e,
                "VAD-assisted transcription failed, falling back to direct"
            );
            direct_transcription(path, transcriber, options).await
        }
        Err(_) => {
            warn!(
                path = %path.display(),
                timeout_secs = ENHANCED_TIMEOUT_SECS,
                "VAD-assisted transcription timed out, falling back to direct"
            );
            direct_transcription(path, transcriber, options).await
        }
    }
}

/// Direct transcription of the whole file. Errors are wrapped, not
/// swallowed: this is the last resort.
async fn direct_transcription<T: Transcriber + ?Sized>(
    path: &Path,
    transcriber: &T,
    options: &TranscriptionOptions,
) -> TranscribeResult<TranscriptResult> {
    transcriber
        .transcribe_with_timestamps(path, options, false)
        .await
        .map_err(|e| {
            TranscribeError::transcription_failed(format!("direct transcription failed: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transcriber stub whose VAD path can fail or stall.
    struct StubTranscriber {
        fail_vad: bool,
        stall_vad: bool,
        fail_direct: bool,
        calls: AtomicUsize,
    }

    impl StubTranscriber {
        fn new(fail_vad: bool, stall_vad: bool, fail_direct: bool) -> Self {
            Self {
                fail_vad,
                stall_vad,
                fail_direct,
                calls: AtomicUsize::new(0),
            }
        }

        fn result(&self, tag: &str) -> TranscriptResult {
            TranscriptResult {
                text: tag.to_string(),
                duration: 10.0,
                spans: vec![],
            }
        }
    }

    #[async_trait]
    impl Transcriber for StubTranscriber {
        async fn transcribe_with_timestamps(
            &self,
            _path: &Path,
            _options: &TranscriptionOptions,
            use_vad: bool,
        ) -> TranscribeResult<TranscriptResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if use_vad {
                if self.stall_vad {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
                if self.fail_vad {
                    return Err(TranscribeError::request_failed("vad path down"));
                }
                return Ok(self.result("vad"));
            }

            if self.fail_direct {
                return Err(TranscribeError::request_failed("direct path down"));
            }
            Ok(self.result("direct"))
        }
    }

    #[tokio::test]
    async fn test_vad_path_preferred() {
        let stub = StubTranscriber::new(false, false, false);
        let result = enhanced_transcription("a.wav", &stub, &TranscriptionOptions::default())
            .await
            .unwrap();

        assert_eq!(result.text, "vad");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_vad_failure_falls_back_to_direct() {
        let stub = StubTranscriber::new(true, false, false);
        let result = enhanced_transcription("a.wav", &stub, &TranscriptionOptions::default())
            .await
            .unwrap();

        assert_eq!(result.text, "direct");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_vad_timeout_falls_back_to_direct() {
        let stub = StubTranscriber::new(false, true, false);
        let result = enhanced_transcription("a.wav", &stub, &TranscriptionOptions::default())
            .await
            .unwrap();

        assert_eq!(result.text, "direct");
    }

    #[tokio::test]
    async fn test_direct_failure_wrapped_and_propagated() {
        let stub = StubTranscriber::new(true, false, true);
        let result =
            enhanced_transcription("a.wav", &stub, &TranscriptionOptions::default()).await;

        match result {
            Err(TranscribeError::TranscriptionFailed(msg)) => {
                assert!(msg.contains("direct transcription failed"));
            }
            other => panic!("expected wrapped failure, got {:?}", other.map(|r| r.text)),
        }
    }
}
