//! Piper provider for the VoiceOver speech layer
//!
//! Piper is run as an external executable, one process per request. Voice
//! models are looked up in a local models directory first and downloaded
//! from the `rhasspy/piper-voices` HuggingFace repository otherwise
//! (requires the `model-hf` feature).
//!
//! # Examples
//!
//! ```no_run
//! use voiceover_speech::providers::piper::{PiperConfig, PiperTTS};
//! use voiceover_speech::{
//!     AudioFormat, SpeechRequest, SynthesisParams, TTSSpeechProvider, VoiceIdentifier,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = PiperTTS::new(PiperConfig::default().with_models_dir("models"))?;
//!
//!     let request = SpeechRequest {
//!         text: "Welcome to the demo.".to_string(),
//!         voice: VoiceIdentifier::new("en_US-hfc_male-medium"),
//!         format: AudioFormat::Wav,
//!         params: SynthesisParams::default(),
//!     };
//!
//!     let response = provider.generate_speech(request).await?;
//!     println!("{} ms of audio", response.duration_ms);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod voices;

mod provider;

// Re-exports
pub use config::PiperConfig;
pub use error::{PiperError, Result};
pub use provider::PiperTTS;
pub use voices::{DEFAULT_VOICE, PIPER_VOICES_REPO, PredefinedVoice, VoiceModelName};
