use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

use murmur_stt_engine::{ComputeType, Device};

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./whisper_service")
}

fn default_beam_size() -> u32 {
    5
}

fn default_max_upload_mb() -> usize {
    100
}

#[derive(Deserialize)]
pub struct Env {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Path to the speech model weights. The one required setting.
    pub model_path: PathBuf,
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub compute_type: ComputeType,
    #[serde(default = "default_beam_size")]
    pub beam_size: u32,

    /// Subtitle splitting stays off unless a maximum duration (in
    /// seconds) is configured here.
    #[serde(default)]
    pub max_segment_duration: Option<f64>,
    #[serde(default)]
    pub transcribe_timeout_secs: Option<u64>,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

static ENV: OnceLock<Env> = OnceLock::new();

pub fn env() -> &'static Env {
    ENV.get_or_init(|| {
        let _ = dotenvy::dotenv();
        envy::from_env().expect("Failed to load environment")
    })
}
