use std::path::PathBuf;
use std::time::Duration;

use murmur_stt_engine::{EngineConfig, TranscribeOptions};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Everything the service needs for one deployment, assembled once at
/// startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Where uploads and generated SRT files live. Created on router
    /// construction if missing.
    pub upload_dir: PathBuf,
    pub engine: EngineConfig,
    pub options: TranscribeOptions,
    /// Maximum subtitle segment duration in seconds. `None` leaves
    /// splitting off, which is the deployment default; flipping it on
    /// is a configuration change, not a code change.
    pub max_segment_duration: Option<f64>,
    /// Deadline for one transcription run. `None` means no deadline.
    pub transcribe_timeout: Option<Duration>,
    pub max_upload_bytes: usize,
}

impl ServiceConfig {
    pub fn new(upload_dir: impl Into<PathBuf>, engine: EngineConfig) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            engine,
            options: TranscribeOptions::default(),
            max_segment_duration: None,
            transcribe_timeout: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
