//! Command-line segmentation analysis runner.
//!
//! Probes and analyzes a local audio file, printing the segmentation
//! analysis as JSON. With `--transcribe` it also runs the configured
//! transcription service and prints reconciled segment records; with
//! `--transcript <spans.json>` it reconciles a previously saved span list
//! instead of calling the service.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use revoice_media::{analyze_audio_segments, probe_audio, VadConfig};
use revoice_models::{ProcessingMethod, TranscriptSpan};
use revoice_transcribe::{
    enhanced_transcription, reconcile_transcript, TranscriptionOptions, WhisperClient,
};

struct CliArgs {
    audio_path: PathBuf,
    transcribe: bool,
    transcript_path: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let audio_path = args
        .next()
        .map(PathBuf::from)
        .context("usage: revoice-cli <audio-file> [--transcribe | --transcript <spans.json>]")?;

    let mut transcribe = false;
    let mut transcript_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--transcribe" => transcribe = true,
            "--transcript" => {
                transcript_path = Some(PathBuf::from(
                    args.next().context("--transcript requires a file path")?,
                ));
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(CliArgs {
        audio_path,
        transcribe,
        transcript_path,
    })
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("revoice=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = parse_args()?;
    let config = VadConfig::default();

    let audio = probe_audio(&args.audio_path)
        .await
        .context("failed to probe audio file")?;
    info!(
        path = %args.audio_path.display(),
        duration = audio.duration,
        codec = %audio.codec,
        "Probed audio file"
    );

    let analysis = analyze_audio_segments(&args.audio_path, &config)
        .await
        .context("segmentation analysis failed")?;
    info!(
        segments = analysis.segments.len(),
        total_speech_time = analysis.total_speech_time,
        "Segmentation analysis complete"
    );

    println!("{}", serde_json::to_string_pretty(&analysis)?);

    if args.transcribe {
        let client = WhisperClient::from_env().context("failed to build Whisper client")?;
        let transcript = enhanced_transcription(
            &args.audio_path,
            &client,
            &TranscriptionOptions::default(),
        )
        .await
        .context("transcription failed")?;
        info!(spans = transcript.spans.len(), "Transcription complete");

        let records =
            reconcile_transcript(&transcript.spans, audio.duration, ProcessingMethod::WhisperVad);
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if let Some(transcript_path) = &args.transcript_path {
        let raw = tokio::fs::read_to_string(transcript_path)
            .await
            .with_context(|| format!("failed to read {}", transcript_path.display()))?;
        let spans: Vec<TranscriptSpan> =
            serde_json::from_str(&raw).context("transcript file is not a span list")?;

        let records = reconcile_transcript(&spans, audio.duration, ProcessingMethod::Whisper);
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    Ok(())
}
