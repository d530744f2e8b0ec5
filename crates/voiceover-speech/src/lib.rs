//! # VoiceOver Speech
//!
//! Text-to-speech provider abstractions for QuickCall VoiceOver.
//!
//! Synthesis backends are hidden behind a small set of traits so the
//! generation pipeline never depends on a particular engine:
//!
//! - `TTSProvider`: a full backend, naming itself and its model
//! - `TTSSpeechProvider`: speech generation
//! - `TTSModelsProvider`: the loaded voice model
//!
//! The crate also carries the WAV codec helpers used to persist audio
//! (`wav`) and model resolution from disk or HuggingFace (`model_source`).
//!
//! ## Providers
//!
//! Enable providers using feature flags:
//! - `piper` (default): runs the Piper executable
//! - `model-hf`: lets providers download missing voice models
//!
//! ## Example
//!
//! ```rust
//! use voiceover_speech::{
//!     AudioFormat, SpeechRequest, SynthesisParams, TTSSpeechProvider, VoiceIdentifier,
//! };
//!
//! async fn generate_speech(provider: &dyn TTSSpeechProvider, text: &str) {
//!     let request = SpeechRequest {
//!         text: text.to_string(),
//!         voice: VoiceIdentifier::new("en_US-lessac-medium"),
//!         format: AudioFormat::Wav,
//!         params: SynthesisParams::default(),
//!     };
//!
//!     let response = provider.generate_speech(request).await.unwrap();
//!     println!("Generated {} samples", response.audio.samples.len());
//! }
//! ```

pub mod error;
pub mod model_source;
mod provider;
pub mod types;
pub mod wav;

// Provider implementations
pub mod providers;

pub use error::{TTSError, TTSResult};
pub use provider::{TTSModelsProvider, TTSProvider, TTSSpeechProvider};
pub use types::{
    AudioData, AudioFormat, ModelInfo, SpeechRequest, SpeechResponse, SynthesisParams,
    VoiceIdentifier,
};
