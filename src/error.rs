//! Error types for vocoach.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocoachError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio errors
    #[error("Audio conversion failed: {message}")]
    AudioConversion { message: String },

    #[error("Audio input error: {message}")]
    AudioInput { message: String },

    // Provider errors
    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    #[error("Speech synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("Dialogue request failed: {message}")]
    Dialogue { message: String },

    #[error("Provider returned HTTP {status}: {details}")]
    Api { status: u16, details: String },

    #[error("Missing API key: environment variable {var} is not set")]
    MissingApiKey { var: String },

    // Transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VocoachError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = VocoachError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = VocoachError::ConfigInvalidValue {
            key: "audio.sample_rate".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for audio.sample_rate: must be positive"
        );
    }

    #[test]
    fn test_audio_conversion_display() {
        let error = VocoachError::AudioConversion {
            message: "WAV write failed".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Audio conversion failed: WAV write failed"
        );
    }

    #[test]
    fn test_transcription_display() {
        let error = VocoachError::Transcription {
            message: "provider unreachable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription failed: provider unreachable"
        );
    }

    #[test]
    fn test_synthesis_display() {
        let error = VocoachError::Synthesis {
            message: "empty input text".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Speech synthesis failed: empty input text"
        );
    }

    #[test]
    fn test_dialogue_display() {
        let error = VocoachError::Dialogue {
            message: "model rejected request".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Dialogue request failed: model rejected request"
        );
    }

    #[test]
    fn test_api_display() {
        let error = VocoachError::Api {
            status: 429,
            details: "rate limited".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Provider returned HTTP 429: rate limited"
        );
    }

    #[test]
    fn test_missing_api_key_display() {
        let error = VocoachError::MissingApiKey {
            var: "STT_KEY".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing API key: environment variable STT_KEY is not set"
        );
    }

    #[test]
    fn test_other_display() {
        let error = VocoachError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: VocoachError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: VocoachError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<VocoachError>();
        assert_sync::<VocoachError>();
    }
}
