use std::path::PathBuf;
use thiserror::Error;
use voiceover_speech::TTSError;
use voiceover_speech::providers::piper::PiperError;
use voiceover_speech::wav::AudioFileError;

/// Errors raised while loading or validating a voice-over config.
///
/// Any of these aborts the run before a single segment is synthesized.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid config field `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Offending field path for validation failures, e.g. `segments[2].id`
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Failure of a single segment. Recorded in its result, never propagated.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] TTSError),

    #[error("Failed to create output directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: AudioFileError,
    },
}

/// Errors from concatenating segment files. Fatal to the combine step only.
#[derive(Error, Debug)]
pub enum CombineError {
    #[error("No segment files to combine")]
    Empty,

    #[error("Combined file {0} would overwrite a segment file")]
    WouldOverwrite(PathBuf),

    #[error("{path} does not match the first segment's format: expected {expected}, found {found}")]
    FormatMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("WAV error in {path}: {source}")]
    Wav {
        path: PathBuf,
        source: hound::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that stop a whole invocation before or instead of generation.
#[derive(Error, Debug)]
pub enum VoiceoverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Model(#[from] PiperError),
}

pub type Result<T> = std::result::Result<T, VoiceoverError>;
