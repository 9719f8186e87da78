//! FFmpeg/FFprobe invocation helpers with bounded execution.
//!
//! Every external process call in this crate goes through [`run_with_timeout`]
//! so a wedged ffmpeg can never hang an analysis request indefinitely.

use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Default bound for external process execution, in seconds.
pub const DEFAULT_PROCESS_TIMEOUT_SECS: u64 = 30;

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

/// Create an FFmpeg command with quiet defaults.
///
/// The caller adds input/filter arguments; stdin is closed and both output
/// streams are captured so diagnostic text can be parsed.
pub fn create_ffmpeg_command() -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-hide_banner")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Run a command to completion, bounded by a timeout.
///
/// On timeout the child is killed and [`MediaError::Timeout`] is returned.
pub async fn run_with_timeout(
    cmd: &mut Command,
    timeout_secs: u64,
    what: &str,
) -> MediaResult<Output> {
    debug!(command = what, timeout_secs, "Running external command");

    // The output future owns the child; kill-on-drop reaps it when the
    // timeout branch wins the race.
    cmd.kill_on_drop(true);
    let child = cmd.spawn()?;

    match tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            warn!(
                command = what,
                timeout_secs, "External command timed out, killing process"
            );
            Err(MediaError::Timeout(timeout_secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_kills_slow_command() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let result = run_with_timeout(&mut cmd, 1, "sleep").await;
        assert!(matches!(result, Err(MediaError::Timeout(1))));
    }

    #[tokio::test]
    async fn test_fast_command_completes() {
        let mut cmd = Command::new("true");
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let output = run_with_timeout(&mut cmd, 5, "true").await.unwrap();
        assert!(output.status.success());
    }
}
