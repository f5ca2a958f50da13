use std::path::Path;

use murmur_subtitle::RawSegment;

use crate::config::{EngineConfig, TranscribeOptions};
use crate::error::Error;

/// Everything one transcription run produces: the ordered raw
/// segments plus the engine's language verdict.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Transcription {
    pub segments: Vec<RawSegment>,
    pub language: String,
    pub language_probability: f64,
}

/// The collaborator boundary around the actual speech model.
///
/// An implementation is an opaque function from an audio file to a
/// [`Transcription`]; loading may be arbitrarily expensive (weights,
/// accelerator memory) and dropping the value must give all of that
/// back. The service never holds an engine across requests.
pub trait SpeechEngine: Send + Sized + 'static {
    fn load(config: &EngineConfig) -> Result<Self, Error>;

    fn transcribe(&self, audio: &Path, options: &TranscribeOptions)
    -> Result<Transcription, Error>;
}
