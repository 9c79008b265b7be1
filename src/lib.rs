//! vocoach - Voice-driven mock interview trainer
//!
//! Streaming transcription core plus the interview dialogue around it:
//! a problem is generated, the candidate answers over voice, the
//! transcript stabilizes while they speak, and the interview ends with a
//! graded feedback report.

// Error handling discipline: propagate, don't panic
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod interview;
pub mod providers;
pub mod streaming;

// Core traits (audio in → text out → dialogue)
pub use providers::{DialogueModel, SpeechSynthesizer, Transcriber};

// Streaming core
pub use streaming::{
    MergerConfig, Segmenter, SegmenterConfig, TranscriptMerger, TranscriptState, TurnPipeline,
    Word,
};

// Interview orchestration
pub use interview::Session;

// Error handling
pub use error::{Result, VocoachError};

// Config
pub use config::{Config, ProviderConfig, ProviderKind};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }
}
