#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load model: {0}")]
    Load(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("unsupported or corrupt audio: {0}")]
    Audio(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
