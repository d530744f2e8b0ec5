//! Raw document shape, before validation.
//!
//! Every recognized option is listed here with its default. Defaults are
//! applied during deserialization so nothing downstream resolves them lazily.

use serde::Deserialize;
use voiceover_speech::providers::piper::DEFAULT_VOICE;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfig {
    #[serde(default)]
    pub voice: RawVoice,
    #[serde(default)]
    pub output: RawOutput,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVoice {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_length_scale")]
    pub length_scale: f64,
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
    #[serde(default = "default_noise_w")]
    pub noise_w: f64,
    #[serde(default = "default_sentence_silence")]
    pub sentence_silence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOutput {
    #[serde(default = "default_format")]
    pub format: String,
    /// Falls back to `voice.sentence_silence` during validation
    #[serde(default)]
    pub combine_silence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
}

pub fn default_model() -> String {
    DEFAULT_VOICE.to_string()
}

pub fn default_length_scale() -> f64 {
    1.0
}

pub fn default_noise_scale() -> f64 {
    0.667
}

pub fn default_noise_w() -> f64 {
    0.8
}

pub fn default_sentence_silence() -> f64 {
    0.5
}

pub fn default_format() -> String {
    "wav".to_string()
}

impl Default for RawVoice {
    fn default() -> Self {
        Self {
            model: default_model(),
            length_scale: default_length_scale(),
            noise_scale: default_noise_scale(),
            noise_w: default_noise_w(),
            sentence_silence: default_sentence_silence(),
        }
    }
}

impl Default for RawOutput {
    fn default() -> Self {
        Self {
            format: default_format(),
            combine_silence: None,
        }
    }
}
