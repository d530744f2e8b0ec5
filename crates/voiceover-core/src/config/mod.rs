//! Voice-over config model.
//!
//! A config is parsed from JSON exactly once per invocation, validated, and
//! is immutable afterwards. Example document:
//!
//! ```json
//! {
//!   "voice": { "model": "en_US-hfc_male-medium", "length_scale": 1.1 },
//!   "output": { "format": "wav" },
//!   "segments": [
//!     { "id": "01_intro", "text": "Welcome to QuickCall." },
//!     { "id": "02_setup", "text": "Let's get you set up." }
//!   ]
//! }
//! ```

pub mod parser;
pub mod schema;
pub mod validator;

pub use parser::{parse_json_file, parse_json_str};
pub use validator::validate_config;

use crate::error::ConfigError;
use schema::{RawConfig, RawSegment, RawVoice};
use std::path::Path;
use voiceover_speech::{AudioFormat, SynthesisParams, VoiceIdentifier};

/// Formats the generator can encode
pub const SUPPORTED_FORMATS: &[AudioFormat] = &[AudioFormat::Wav];

/// Parameters handed to the synthesis engine
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    pub model: String,
    pub length_scale: f64,
    pub noise_scale: f64,
    pub noise_w: f64,
    pub sentence_silence: f64,
}

impl VoiceSettings {
    pub fn voice(&self) -> VoiceIdentifier {
        VoiceIdentifier::new(self.model.clone())
    }

    pub fn params(&self) -> SynthesisParams {
        SynthesisParams {
            length_scale: self.length_scale as f32,
            noise_scale: self.noise_scale as f32,
            noise_w: self.noise_w as f32,
            sentence_silence: self.sentence_silence as f32,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub format: AudioFormat,
    /// Seconds of silence between segments in the combined file
    pub combine_silence: f64,
}

/// One unit of text mapped to one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: String,
    pub text: String,
}

impl Segment {
    pub fn file_name(&self, format: AudioFormat) -> String {
        format!("{}.{}", self.id, format.extension())
    }
}

/// Validated voice-over config
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    voice: VoiceSettings,
    output: OutputSettings,
    segments: Vec<Segment>,
}

impl Config {
    /// Parse and validate a JSON document
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        parse_json_str(json)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        parse_json_file(path)
    }

    /// Build a config from plain text lines, one segment per non-blank line.
    ///
    /// Segments are named `segment_001`, `segment_002`, ... and every other
    /// setting takes its default.
    pub fn from_lines<I, S>(lines: I, model: impl Into<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .enumerate()
            .map(|(index, line)| RawSegment {
                id: Some(validator::default_segment_id(index + 1)),
                text: line.as_ref().trim().to_string(),
            })
            .collect();

        validate_config(RawConfig {
            voice: RawVoice {
                model: model.into(),
                ..RawVoice::default()
            },
            segments,
            ..RawConfig::default()
        })
    }

    pub fn voice(&self) -> &VoiceSettings {
        &self.voice
    }

    pub fn output(&self) -> &OutputSettings {
        &self.output
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}
