mod transcribe;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use murmur_stt_engine::SpeechEngine;
use tokio::sync::Semaphore;

use crate::config::ServiceConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: Arc<ServiceConfig>,
    /// Single permit: model acquisition, inference, and release are
    /// serialized process-wide. The accelerator runtime is not assumed
    /// safe for concurrent use, so this is a correctness requirement,
    /// not tuning.
    pub inference: Arc<Semaphore>,
}

pub fn router<E: SpeechEngine>(config: ServiceConfig) -> Router {
    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        tracing::warn!(
            dir = %config.upload_dir.display(),
            error = %e,
            "upload_dir_create_failed"
        );
    }

    let max_upload_bytes = config.max_upload_bytes;
    let state = AppState {
        config: Arc::new(config),
        inference: Arc::new(Semaphore::new(1)),
    };

    Router::new()
        .route("/transcribe", post(transcribe::handler::<E>))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
