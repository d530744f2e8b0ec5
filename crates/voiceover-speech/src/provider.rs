use crate::{AudioFormat, ModelInfo, SpeechRequest, SpeechResponse, TTSResult};
use async_trait::async_trait;

/// A complete synthesis backend: speech generation plus model metadata.
pub trait TTSProvider: TTSSpeechProvider + TTSModelsProvider + Send + Sync {
    /// Short provider name used in logs and errors
    fn provider_name(&self) -> &str;
}

/// Turns text into audio samples.
///
/// This is the only capability the voice-over pipeline depends on, so test
/// doubles implement just this trait.
#[async_trait]
pub trait TTSSpeechProvider: Send + Sync {
    /// Synthesize `request.text` with the requested voice and parameters.
    ///
    /// Errors are per request; callers decide whether a failure is fatal.
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse>;

    /// Output formats the provider can hand back
    fn supported_formats(&self) -> Vec<AudioFormat> {
        vec![AudioFormat::Wav]
    }

    fn supports_format(&self, format: AudioFormat) -> bool {
        self.supported_formats().contains(&format)
    }
}

/// Describes the voice model a provider is bound to.
pub trait TTSModelsProvider: Send + Sync {
    fn get_current_model(&self) -> ModelInfo;
}
