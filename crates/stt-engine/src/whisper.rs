use std::path::Path;

use murmur_subtitle::{RawSegment, Word};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::{Device, EngineConfig, TranscribeOptions};
use crate::engine::{SpeechEngine, Transcription};
use crate::error::Error;

const TARGET_SAMPLE_RATE: u32 = 16_000;

/// whisper.cpp-backed engine. Loading maps the ggml weights (and
/// uploads them to the accelerator when `device` asks for one);
/// dropping the context frees all of it, which is what gives
/// [`crate::ModelHandle`] its release guarantee.
pub struct WhisperEngine {
    context: WhisperContext,
}

impl SpeechEngine for WhisperEngine {
    fn load(config: &EngineConfig) -> Result<Self, Error> {
        let mut params = WhisperContextParameters::default();
        params.use_gpu(!matches!(config.device, Device::Cpu));

        let model_path = config.model_path.to_str().ok_or_else(|| {
            Error::Load(format!(
                "model path is not valid UTF-8: {}",
                config.model_path.display()
            ))
        })?;

        let context = WhisperContext::new_with_params(model_path, params)
            .map_err(|e| Error::Load(e.to_string()))?;

        Ok(Self { context })
    }

    fn transcribe(
        &self,
        audio: &Path,
        options: &TranscribeOptions,
    ) -> Result<Transcription, Error> {
        let samples = read_mono_f32(audio)?;

        let mut state = self
            .context
            .create_state()
            .map_err(|e| Error::Inference(e.to_string()))?;

        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: options.beam_size as i32,
            patience: -1.0,
        });
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_token_timestamps(options.word_timestamps);
        // Closest knob whisper.cpp offers to upstream VAD filtering.
        params.set_suppress_non_speech_tokens(options.vad_filter);
        if let Some(language) = options.language.as_deref() {
            params.set_language(Some(language));
        }

        state
            .full(params, &samples)
            .map_err(|e| Error::Inference(e.to_string()))?;

        let mut segments = Vec::new();
        let n_segments = state
            .full_n_segments()
            .map_err(|e| Error::Inference(e.to_string()))?;

        for i in 0..n_segments {
            let text = state
                .full_get_segment_text(i)
                .map_err(|e| Error::Inference(e.to_string()))?;
            let start = state
                .full_get_segment_t0(i)
                .map_err(|e| Error::Inference(e.to_string()))? as f64
                / 100.0;
            let end = state
                .full_get_segment_t1(i)
                .map_err(|e| Error::Inference(e.to_string()))? as f64
                / 100.0;

            let words = if options.word_timestamps {
                collect_words(&self.context, &state, i)?
            } else {
                Vec::new()
            };

            segments.push(RawSegment {
                start,
                end,
                text,
                words,
            });
        }

        let language = state
            .full_lang_id()
            .ok()
            .and_then(whisper_rs::get_lang_str)
            .unwrap_or("en")
            .to_string();

        Ok(Transcription {
            segments,
            language,
            // whisper.cpp's full() does not surface the detection
            // probability; report certainty for the chosen language.
            language_probability: 1.0,
        })
    }
}

/// Reassembles whisper.cpp's token stream into words. Tokens carry
/// 10ms-resolution timestamps; a token whose text starts with a space
/// opens a new word.
fn collect_words(
    context: &WhisperContext,
    state: &whisper_rs::WhisperState,
    segment: i32,
) -> Result<Vec<Word>, Error> {
    let n_tokens = state
        .full_n_tokens(segment)
        .map_err(|e| Error::Inference(e.to_string()))?;

    let mut words: Vec<Word> = Vec::new();
    let mut current = String::new();
    let mut current_start = 0.0_f64;
    let mut current_end: Option<f64> = None;

    for t in 0..n_tokens {
        let data = state
            .full_get_token_data(segment, t)
            .map_err(|e| Error::Inference(e.to_string()))?;
        let piece = context
            .token_to_str(data.id)
            .map_err(|e| Error::Inference(e.to_string()))?;

        // Control tokens like "[_BEG_]" and "<|endoftext|>" carry no
        // speech.
        if piece.starts_with("[_") || piece.starts_with("<|") {
            continue;
        }

        let opens_word = piece.starts_with(' ');
        if opens_word && !current.is_empty() {
            words.push(Word {
                start: current_start,
                end: current_end,
                text: std::mem::take(&mut current),
            });
        }
        if current.is_empty() {
            current_start = data.t0 as f64 / 100.0;
        }
        current.push_str(&piece);
        current_end = Some(data.t1 as f64 / 100.0);
    }

    if !current.is_empty() {
        words.push(Word {
            start: current_start,
            end: current_end,
            text: current,
        });
    }

    Ok(words)
}

/// Decodes a WAV file to mono f32 at whisper's 16kHz input rate.
/// Multi-channel audio is averaged; other rates are linearly
/// resampled.
fn read_mono_f32(path: &Path) -> Result<Vec<f32>, Error> {
    let mut reader = hound::WavReader::open(path).map_err(|e| Error::Audio(e.to_string()))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| Error::Audio(e.to_string()))?,
        hound::SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| Error::Audio(e.to_string()))?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let mono: Vec<f32> = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    if spec.sample_rate == TARGET_SAMPLE_RATE {
        return Ok(mono);
    }
    Ok(resample(&mono, spec.sample_rate, TARGET_SAMPLE_RATE))
}

fn resample(input: &[f32], from: u32, to: u32) -> Vec<f32> {
    if input.is_empty() {
        return Vec::new();
    }
    let ratio = from as f64 / to as f64;
    let out_len = ((input.len() as f64) / ratio).floor() as usize;
    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = pos as usize;
            let frac = (pos - idx as f64) as f32;
            let a = input[idx];
            let b = input[(idx + 1).min(input.len() - 1)];
            a + (b - a) * frac
        })
        .collect()
}
