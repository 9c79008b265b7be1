//! Hugging Face Inference API adapters.
//!
//! STT and TTS post to a model-specific inference URL; the dialogue
//! adapter uses the OpenAI-compatible messages API that text-generation
//! endpoints expose under `/v1`.

use crate::audio::wav::encode_wav;
use crate::config::ProviderConfig;
use crate::error::{Result, VocoachError};
use crate::providers::dialogue::{DialogueModel, Message};
use crate::providers::openai::OpenAiDialogue;
use crate::providers::synthesizer::{AudioStream, SpeechSynthesizer};
use crate::providers::transcriber::Transcriber;
use crate::providers::{error_from_response, http_client};
use crate::streaming::merger::Word;
use async_trait::async_trait;
use serde::Deserialize;

fn inference_url(config: &ProviderConfig, service: &str) -> Result<String> {
    config
        .url
        .clone()
        .ok_or_else(|| VocoachError::ConfigInvalidValue {
            key: format!("{}.url", service),
            message: "Hugging Face endpoints require an explicit model URL".to_string(),
        })
}

/// Speech-to-text via a Hugging Face inference endpoint.
pub struct HfTranscriber {
    client: reqwest::Client,
    url: String,
    api_key: String,
    sample_rate: u32,
}

impl HfTranscriber {
    pub fn new(config: &ProviderConfig, sample_rate: u32) -> Result<Self> {
        Ok(Self {
            client: http_client(),
            url: inference_url(config, "stt")?,
            api_key: config.api_key()?,
            sample_rate,
        })
    }

    async fn request(&self, samples: &[i16], timestamps: bool) -> Result<String> {
        let wav = encode_wav(samples, self.sample_rate)?;

        let mut request = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .body(wav);
        if timestamps {
            request = request.query(&[("return_timestamps", "word")]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct HfTranscription {
    text: Option<String>,
    #[serde(default)]
    chunks: Vec<HfChunk>,
}

#[derive(Debug, Deserialize)]
struct HfChunk {
    text: String,
    /// Word-level [start, end] offsets in seconds.
    timestamp: (f64, f64),
}

fn parse_text(body: &str) -> Result<String> {
    let parsed: HfTranscription =
        serde_json::from_str(body).map_err(|e| VocoachError::Transcription {
            message: format!("Malformed transcription response: {}", e),
        })?;

    parsed
        .text
        .map(|text| text.trim().to_string())
        .ok_or_else(|| VocoachError::Transcription {
            message: "No transcription returned by provider".to_string(),
        })
}

fn parse_chunks(body: &str) -> Result<Vec<Word>> {
    let parsed: HfTranscription =
        serde_json::from_str(body).map_err(|e| VocoachError::Transcription {
            message: format!("Malformed transcription response: {}", e),
        })?;

    if parsed.chunks.is_empty() && parsed.text.is_none() {
        return Err(VocoachError::Transcription {
            message: "Provider returned neither text nor word timestamps".to_string(),
        });
    }

    Ok(parsed
        .chunks
        .into_iter()
        .map(|c| Word::new(c.text.trim(), c.timestamp.0, c.timestamp.1))
        .collect())
}

#[async_trait]
impl Transcriber for HfTranscriber {
    async fn transcribe(&self, samples: &[i16], _context: Option<&str>) -> Result<String> {
        // The inference API takes raw audio only; prior context is not
        // supported and silently ignored.
        let body = self.request(samples, false).await?;
        parse_text(&body)
    }

    async fn transcribe_timed(&self, samples: &[i16]) -> Result<Vec<Word>> {
        let body = self.request(samples, true).await?;
        parse_chunks(&body)
    }
}

/// Text-to-speech via a Hugging Face inference endpoint.
pub struct HfSynthesizer {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HfSynthesizer {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(),
            url: inference_url(config, "tts")?,
            api_key: config.api_key()?,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for HfSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn synthesize_stream(&self, _text: &str) -> Result<AudioStream> {
        // The inference API answers with a single audio blob.
        Err(VocoachError::Synthesis {
            message: "Streaming synthesis is not supported by this provider".to_string(),
        })
    }
}

/// Dialogue via the OpenAI-compatible messages API.
///
/// Text-generation endpoints expose the same chat shape under `/v1`, so
/// this adapter delegates wholesale.
pub struct HfDialogue {
    inner: OpenAiDialogue,
}

impl HfDialogue {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        inference_url(config, "llm")?;
        Ok(Self {
            inner: OpenAiDialogue::new(config)?,
        })
    }
}

#[async_trait]
impl DialogueModel for HfDialogue {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        self.inner.complete(messages).await
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
    ) -> Result<crate::providers::dialogue::TextStream> {
        self.inner.complete_stream(messages).await
    }
}
