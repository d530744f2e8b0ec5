//! # VoiceOver Core
//!
//! Batch voice-over generation for QuickCall. A JSON config names a voice and
//! an ordered list of text segments; each segment is synthesized into its own
//! WAV file, and the files can optionally be concatenated with silence gaps.
//!
//! A single failing segment never aborts the batch. A run succeeds when at
//! least one segment was produced and, if requested, the combined file was
//! written.
//!
//! ```no_run
//! use voiceover_core::{GenerateOptions, generate_voiceover};
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = GenerateOptions::default().with_combine(true);
//!     let ok = generate_voiceover("voiceover.json", &options).await;
//!     std::process::exit(if ok { 0 } else { 1 });
//! }
//! ```

pub mod combiner;
pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod tests;

pub use combiner::combine;
pub use config::{Config, OutputSettings, Segment, VoiceSettings};
pub use error::{CombineError, ConfigError, Result, SegmentError, VoiceoverError};
pub use generator::{GenerationResult, generate};
pub use pipeline::{
    DEFAULT_COMBINED_FILENAME, GenerateOptions, generate_from_text, generate_voiceover, run,
    try_generate_config, try_generate_from_text, try_generate_voiceover,
};
pub use report::{CombineOutcome, RunReport};
