use std::io::Write;
use std::path::{Path, PathBuf};

use murmur_stt_engine::{EngineConfig, ModelHandle, SpeechEngine, TranscribeOptions};
use murmur_subtitle::{SubtitleSegment, split_long_segments, write_srt};

use crate::error::Error;

/// The request-scoped stages, in order. The error path from any stage
/// goes through cleanup before surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    ModelLoading,
    Transcribing,
    Splitting,
    Serializing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::ModelLoading => "model_loading",
            Stage::Transcribing => "transcribing",
            Stage::Splitting => "splitting",
            Stage::Serializing => "serializing",
        };
        f.write_str(s)
    }
}

/// What a successful run hands back. The SRT file at `path` belongs to
/// the caller from here on; the pipeline will not touch it again.
#[derive(Debug)]
pub struct SrtArtifact {
    pub path: PathBuf,
    pub language: String,
    pub language_probability: f64,
    pub segment_count: usize,
}

/// Runs the full transcription pipeline for one audio file. Blocking;
/// call sites wrap it in `spawn_blocking`.
///
/// Two guarantees hold on every exit path, success or failure:
///
/// - a model instance that was acquired is released exactly once
///   (RAII on [`ModelHandle`]);
/// - no partial SRT survives a failure — the artifact either comes
///   back complete or is removed here.
///
/// The uploaded audio file is owned by the caller's guard, not by the
/// pipeline.
pub fn run<E: SpeechEngine>(
    engine_config: &EngineConfig,
    options: &TranscribeOptions,
    max_segment_duration: Option<f64>,
    audio_path: &Path,
) -> Result<SrtArtifact, Error> {
    let srt_path = audio_path.with_extension("srt");
    let result = run_stages::<E>(engine_config, options, max_segment_duration, audio_path, &srt_path);

    if result.is_err()
        && srt_path.exists()
        && let Err(e) = std::fs::remove_file(&srt_path)
    {
        tracing::warn!(path = %srt_path.display(), error = %e, "partial_srt_cleanup_failed");
    }

    result
}

fn run_stages<E: SpeechEngine>(
    engine_config: &EngineConfig,
    options: &TranscribeOptions,
    max_segment_duration: Option<f64>,
    audio_path: &Path,
    srt_path: &Path,
) -> Result<SrtArtifact, Error> {
    tracing::debug!(stage = %Stage::ModelLoading, "pipeline_stage");
    let model = ModelHandle::<E>::acquire(engine_config).map_err(Error::ModelUnavailable)?;

    tracing::debug!(stage = %Stage::Transcribing, audio = %audio_path.display(), "pipeline_stage");
    let transcription = model
        .transcribe(audio_path, options)
        .map_err(Error::TranscriptionFailed)?;

    tracing::info!(
        language = %transcription.language,
        probability = transcription.language_probability,
        raw_segments = transcription.segments.len(),
        "transcription_complete"
    );

    tracing::debug!(stage = %Stage::Splitting, max_duration = ?max_segment_duration, "pipeline_stage");
    let segments: Vec<SubtitleSegment> = match max_segment_duration {
        Some(max_duration) => split_long_segments(transcription.segments, max_duration),
        None => transcription
            .segments
            .into_iter()
            .map(Into::into)
            .collect(),
    };

    tracing::debug!(stage = %Stage::Serializing, srt = %srt_path.display(), "pipeline_stage");
    let mut writer = std::io::BufWriter::new(std::fs::File::create(srt_path)?);
    write_srt(&mut writer, &segments)?;
    writer.flush()?;

    // Releases here on success; the handle's Drop covers the `?`
    // paths above.
    model.release();

    Ok(SrtArtifact {
        path: srt_path.to_path_buf(),
        language: transcription.language,
        language_probability: transcription.language_probability,
        segment_count: segments.len(),
    })
}
