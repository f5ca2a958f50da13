use std::path::Path;

use murmur_stt_engine::{
    EngineConfig, Error, SpeechEngine, TranscribeOptions, Transcription,
};

/// Engine driven by a JSON fixture at the configured model path.
///
/// A missing or unreadable fixture makes `load` fail, which exercises
/// the model-unavailable path; a `{"fail": "..."}` fixture makes
/// `transcribe` fail; a `{"delay_ms": ..., "transcription": {...}}`
/// fixture sleeps before answering; anything else deserializes as the
/// [`Transcription`] to return.
pub struct MockEngine {
    fixture: Fixture,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Fixture {
    Fail { fail: String },
    Slow {
        delay_ms: u64,
        transcription: Transcription,
    },
    Transcribe(Transcription),
}

impl SpeechEngine for MockEngine {
    fn load(config: &EngineConfig) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(&config.model_path)
            .map_err(|e| Error::Load(format!("{}: {e}", config.model_path.display())))?;
        let fixture = serde_json::from_str(&raw).map_err(|e| Error::Load(e.to_string()))?;
        Ok(Self { fixture })
    }

    fn transcribe(
        &self,
        _audio: &Path,
        _options: &TranscribeOptions,
    ) -> Result<Transcription, Error> {
        match &self.fixture {
            Fixture::Fail { fail } => Err(Error::Inference(fail.clone())),
            Fixture::Slow { delay_ms, transcription } => {
                std::thread::sleep(std::time::Duration::from_millis(*delay_ms));
                Ok(transcription.clone())
            }
            Fixture::Transcribe(transcription) => Ok(transcription.clone()),
        }
    }
}
