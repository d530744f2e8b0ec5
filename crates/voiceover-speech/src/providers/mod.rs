//! Speech provider implementations
//!
//! Each provider is feature-gated and can be enabled individually.

#[cfg(feature = "piper")]
pub mod piper;
