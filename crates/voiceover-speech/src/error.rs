use thiserror::Error;

/// Errors raised by a TTS provider for a single request
#[derive(Error, Debug)]
pub enum TTSError {
    /// Failure inside the synthesis engine; `(message, provider)`
    #[error("{1} failed: {0}")]
    ProviderError(String, String),

    /// Requested voice is not the one the provider was built for
    #[error("Voice '{0}' is not loaded (available: {1})")]
    VoiceNotFound(String, String),

    /// Engine ran but produced no usable audio; `(reason, text chars, voice)`
    #[error("No audio generated for {1}-character text with voice '{2}': {0}")]
    GenerationFailed(String, usize, String),

    #[error("Audio format '{0}' is not supported by {1}")]
    UnsupportedFormat(String, String),

    #[error("Failed to {operation} {path}: {source}")]
    Io {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Voice model files are missing and could not be fetched
    #[error("Voice model '{0}' not available: {1}")]
    ModelNotFound(String, String),

    /// Engine output could not be decoded
    #[error("Invalid audio from engine: {0}")]
    InvalidAudio(String),
}

pub type TTSResult<T> = Result<T, TTSError>;
