use axum::{
    Json,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use murmur_stt_engine::SpeechEngine;

use crate::pipeline;
use crate::upload::TempUpload;

use super::AppState;

/// `POST /transcribe`: multipart field `file` in, SRT file out.
pub(super) async fn handler<E: SpeechEngine>(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let file = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => return bad_request("No file part"),
        }
    };

    let filename = file.file_name().unwrap_or_default().to_string();
    if filename.is_empty() {
        return bad_request("No selected file");
    }
    let audio = match file.bytes().await {
        Ok(bytes) if !bytes.is_empty() => bytes,
        Ok(_) | Err(_) => return bad_request("No selected file"),
    };

    let upload = match TempUpload::save(&state.config.upload_dir, &filename, &audio).await {
        Ok(upload) => upload,
        Err(e) => {
            tracing::error!(error = %e, "upload_save_failed");
            return internal_error("failed to store upload");
        }
    };

    // The permit travels into the blocking task so inference stays
    // serialized for its entire lifetime, even when this handler
    // returns early on timeout.
    let permit = match state.inference.clone().acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => return internal_error("service shutting down"),
    };

    let config = state.config.clone();
    let audio_path = upload.path().to_path_buf();
    let mut task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        pipeline::run::<E>(
            &config.engine,
            &config.options,
            config.max_segment_duration,
            &audio_path,
        )
    });

    let joined = match state.config.transcribe_timeout {
        Some(deadline) => match tokio::time::timeout(deadline, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                tracing::warn!(timeout_ms = deadline.as_millis() as u64, "transcription_timed_out");
                // Nobody is left to serve the artifact once this
                // response goes out; the still-running task finishes
                // on its own and its output gets discarded.
                tokio::spawn(discard_unserved_artifact(task));
                return internal_error(&format!(
                    "transcription timed out after {deadline:?}"
                ));
            }
        },
        None => (&mut task).await,
    };

    let artifact = match joined {
        Ok(Ok(artifact)) => artifact,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "pipeline_failed");
            return internal_error(&e.to_string());
        }
        Err(e) => {
            tracing::error!(error = %e, "pipeline_task_panicked");
            return internal_error("internal error");
        }
    };

    // The audio temp file has served its purpose; the SRT artifact
    // stays, it now belongs to the response.
    drop(upload);

    let srt = match tokio::fs::read(&artifact.path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(path = %artifact.path.display(), error = %e, "artifact_read_failed");
            return internal_error("failed to read subtitle file");
        }
    };

    let download_name = artifact
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript.srt".to_string());

    tracing::info!(
        language = %artifact.language,
        segments = artifact.segment_count,
        bytes = srt.len(),
        "transcription_served"
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/x-subrip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{download_name}\""),
            ),
        ],
        srt,
    )
        .into_response()
}

/// Awaits a transcription run whose requester has already been
/// answered and removes the SRT it produced, if any. Failures inside
/// the run clean up after themselves through the pipeline.
async fn discard_unserved_artifact(
    task: tokio::task::JoinHandle<Result<pipeline::SrtArtifact, crate::Error>>,
) {
    let Ok(Ok(artifact)) = task.await else {
        return;
    };
    if let Err(e) = tokio::fs::remove_file(&artifact.path).await {
        tracing::warn!(
            path = %artifact.path.display(),
            error = %e,
            "unserved_artifact_cleanup_failed"
        );
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}
