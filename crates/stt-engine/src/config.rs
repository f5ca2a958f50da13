use std::path::PathBuf;

/// Static per-deployment engine configuration. One instance is built
/// at startup and passed down; nothing reads model settings out of
/// globals at request time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    pub model_path: PathBuf,
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub compute: ComputeType,
}

impl EngineConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            device: Device::default(),
            compute: ComputeType::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
    Metal,
}

/// Inference precision. `Int8Float16` trades accuracy for memory, the
/// usual pick for consumer accelerators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeType {
    #[default]
    Int8Float16,
    Float16,
    Float32,
}

/// Per-invocation decoding options. Defaults mirror what the service
/// always requests: word timestamps on, VAD filtering on, beam of 5.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TranscribeOptions {
    pub beam_size: u32,
    pub word_timestamps: bool,
    pub vad_filter: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            beam_size: 5,
            word_timestamps: true,
            vad_filter: true,
            language: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_and_compute_parse_from_config_strings() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"model_path": "/models/large-v2", "device": "cuda", "compute": "int8_float16"}"#,
        )
        .unwrap();
        assert_eq!(config.device, Device::Cuda);
        assert_eq!(config.compute, ComputeType::Int8Float16);
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"model_path": "/models/base"}"#).unwrap();
        assert_eq!(config.device, Device::Cpu);
        assert_eq!(config.compute, ComputeType::Int8Float16);

        let options = TranscribeOptions::default();
        assert_eq!(options.beam_size, 5);
        assert!(options.word_timestamps);
        assert!(options.vad_filter);
    }
}
