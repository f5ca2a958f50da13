/// Pipeline failure taxonomy. Upload problems (missing part, empty
/// filename) never reach the pipeline; they are answered at the route
/// as 400s. Everything here surfaces as a 500 with the message in the
/// body, and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model unavailable: {0}")]
    ModelUnavailable(#[source] murmur_stt_engine::Error),

    #[error("transcription failed: {0}")]
    TranscriptionFailed(#[source] murmur_stt_engine::Error),

    #[error("failed to write subtitle file: {0}")]
    WriteFailed(#[from] std::io::Error),
}
