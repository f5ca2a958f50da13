mod config;
mod engine;
mod error;
mod lifecycle;

#[cfg(feature = "whisper")]
mod whisper;

pub use config::{ComputeType, Device, EngineConfig, TranscribeOptions};
pub use engine::{SpeechEngine, Transcription};
pub use error::Error;
pub use lifecycle::ModelHandle;

#[cfg(feature = "whisper")]
pub use whisper::WhisperEngine;
