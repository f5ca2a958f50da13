use std::path::Path;

use crate::config::{EngineConfig, TranscribeOptions};
use crate::engine::{SpeechEngine, Transcription};
use crate::error::Error;

/// Owns one engine instance for the duration of one request.
///
/// Acquisition is always fresh (no pooling, no cache): the tradeoff is
/// per-request load latency in exchange for accelerator memory going
/// back to zero between requests. Release happens on every exit path,
/// exactly once, through `Drop`; `release` exists for call sites that
/// want the hand-back to be visible in the code.
pub struct ModelHandle<E: SpeechEngine> {
    engine: Option<E>,
}

impl<E: SpeechEngine> ModelHandle<E> {
    pub fn acquire(config: &EngineConfig) -> Result<Self, Error> {
        tracing::info!(
            model = %config.model_path.display(),
            device = ?config.device,
            compute = ?config.compute,
            "loading_model"
        );
        let engine = E::load(config)?;
        Ok(Self {
            engine: Some(engine),
        })
    }

    pub fn transcribe(
        &self,
        audio: &Path,
        options: &TranscribeOptions,
    ) -> Result<Transcription, Error> {
        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| Error::Inference("model handle already released".to_string()))?;
        engine.transcribe(audio, options)
    }

    /// Consumes the handle, releasing the engine now.
    pub fn release(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(engine) = self.engine.take() {
            drop(engine);
            tracing::info!("model_released");
        }
    }
}

impl<E: SpeechEngine> Drop for ModelHandle<E> {
    fn drop(&mut self) {
        self.release_now();
    }
}
