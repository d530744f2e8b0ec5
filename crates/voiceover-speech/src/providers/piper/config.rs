//! Configuration for the Piper provider

use super::voices::DEFAULT_VOICE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the Piper provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiperConfig {
    /// Voice model to load (e.g. `en_US-hfc_male-medium`)
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Directory holding `{voice}.onnx` files; also the download cache root
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Piper executable
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before Piper's own flags, e.g. `["-m", "piper"]`
    /// when `program` is a Python interpreter
    #[serde(default)]
    pub program_args: Vec<String>,

    /// Download the voice from HuggingFace when it is not in `models_dir`
    #[serde(default = "default_download")]
    pub download: bool,

    /// Voices repository revision (default: main)
    #[serde(default)]
    pub revision: Option<String>,
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_program() -> String {
    "piper".to_string()
}

fn default_download() -> bool {
    true
}

impl Default for PiperConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            models_dir: default_models_dir(),
            program: default_program(),
            program_args: Vec::new(),
            download: default_download(),
            revision: None,
        }
    }
}

impl PiperConfig {
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    pub fn with_program(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.program_args = args;
        self
    }
}
