//! Error types for the Piper provider

use crate::model_source::ModelSourceError;
use crate::wav::AudioFileError;
use thiserror::Error;

/// Piper specific errors
#[derive(Error, Debug)]
pub enum PiperError {
    /// Voice name does not follow `{locale}-{name}-{quality}`
    #[error(
        "Invalid voice name: '{0}'\nSuggestion: Piper voices look like 'en_US-lessac-medium'; run with --voices to list some"
    )]
    InvalidVoice(String),

    /// Voice model could not be found locally or downloaded
    #[error("Voice model unavailable: {0}\nReason: {1}")]
    ModelUnavailable(String, ModelSourceError),

    /// The Piper executable could not be started
    #[error(
        "Failed to start Piper: {0}\nProgram: {1}\nSuggestion: Install piper (pip install piper-tts) or pass --piper"
    )]
    SpawnError(std::io::Error, String),

    /// Piper exited unsuccessfully
    #[error("Piper exited with {0}\nStderr: {1}")]
    ProcessFailed(String, String),

    /// IO error
    #[error("IO error: {0}\nFile path: {1}\nOperation: {2}")]
    IoError(std::io::Error, String, String),

    /// Piper produced audio that could not be decoded
    #[error("Failed to decode Piper output: {0}")]
    AudioError(#[from] AudioFileError),
}

impl PiperError {
    pub fn invalid_voice(voice: impl Into<String>) -> Self {
        Self::InvalidVoice(voice.into())
    }

    pub fn io_error(
        err: std::io::Error,
        path: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self::IoError(err, path.into(), operation.into())
    }
}

/// Result type for Piper operations
pub type Result<T> = std::result::Result<T, PiperError>;

impl From<PiperError> for crate::TTSError {
    fn from(err: PiperError) -> Self {
        match err {
            PiperError::InvalidVoice(voice) => {
                crate::TTSError::VoiceNotFound(voice, "see --voices".to_string())
            }
            PiperError::ModelUnavailable(voice, source) => {
                crate::TTSError::ModelNotFound(voice, source.to_string())
            }
            PiperError::SpawnError(e, program) => crate::TTSError::ProviderError(
                format!("failed to start '{}': {}", program, e),
                "piper".to_string(),
            ),
            PiperError::ProcessFailed(status, stderr) => crate::TTSError::ProviderError(
                format!("piper exited with {}: {}", status, stderr.trim()),
                "piper".to_string(),
            ),
            PiperError::IoError(source, path, operation) => crate::TTSError::Io {
                operation,
                path,
                source,
            },
            PiperError::AudioError(e) => crate::TTSError::InvalidAudio(e.to_string()),
        }
    }
}
