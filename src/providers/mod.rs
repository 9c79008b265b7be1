//! External service interfaces and their provider adapters.
//!
//! The core pipeline depends only on the [`Transcriber`],
//! [`SpeechSynthesizer`], and [`DialogueModel`] traits. The concrete
//! backend is chosen once, here, at construction time; nothing
//! downstream ever branches on provider kind.

pub mod dialogue;
pub mod huggingface;
pub mod openai;
pub mod synthesizer;
pub mod transcriber;

pub use dialogue::{DialogueModel, Message, MockDialogue, Role, TextStream};
pub use synthesizer::{AudioStream, MockSynthesizer, SpeechSynthesizer};
pub use transcriber::{MockTranscriber, Transcriber};

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::{Result, VocoachError};

/// Shared HTTP client construction for all adapters.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Turn a non-success provider response into a distinguished API error.
///
/// Pulls the provider's own error message out of the body when it is
/// JSON-shaped; falls back to the raw body text.
pub(crate) async fn error_from_response(response: reqwest::Response) -> VocoachError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let details = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .map(|e| match e {
                    serde_json::Value::String(s) => s.clone(),
                    other => other
                        .get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| other.to_string()),
                })
        })
        .unwrap_or_else(|| body.trim().to_string());

    VocoachError::Api {
        status,
        details: if details.is_empty() {
            "No error message provided".to_string()
        } else {
            details
        },
    }
}

/// Build the transcription backend selected by the config.
pub fn build_transcriber(
    config: &ProviderConfig,
    sample_rate: u32,
) -> Result<Box<dyn Transcriber>> {
    Ok(match config.kind {
        ProviderKind::OpenAi => Box::new(openai::OpenAiTranscriber::new(config, sample_rate)?),
        ProviderKind::HuggingFace => {
            Box::new(huggingface::HfTranscriber::new(config, sample_rate)?)
        }
    })
}

/// Build the speech-synthesis backend selected by the config.
pub fn build_synthesizer(config: &ProviderConfig) -> Result<Box<dyn SpeechSynthesizer>> {
    Ok(match config.kind {
        ProviderKind::OpenAi => Box::new(openai::OpenAiSynthesizer::new(config)?),
        ProviderKind::HuggingFace => Box::new(huggingface::HfSynthesizer::new(config)?),
    })
}

/// Build the dialogue backend selected by the config.
pub fn build_dialogue(config: &ProviderConfig) -> Result<Box<dyn DialogueModel>> {
    Ok(match config.kind {
        ProviderKind::OpenAi => Box::new(openai::OpenAiDialogue::new(config)?),
        ProviderKind::HuggingFace => Box::new(huggingface::HfDialogue::new(config)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_transcriber_requires_key() {
        let config = ProviderConfig {
            kind: ProviderKind::OpenAi,
            key_env: "VOCOACH_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
            ..Default::default()
        };

        let result = build_transcriber(&config, 48000);
        assert!(matches!(result, Err(VocoachError::MissingApiKey { .. })));
    }

    #[test]
    fn test_build_hf_requires_url() {
        let config = ProviderConfig {
            kind: ProviderKind::HuggingFace,
            url: None,
            ..Default::default()
        };

        let result = build_synthesizer(&config);
        assert!(matches!(
            result,
            Err(VocoachError::ConfigInvalidValue { .. })
        ));
    }
}
