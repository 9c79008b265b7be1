//! OpenAI-compatible provider adapters.
//!
//! One adapter per service, all speaking the `/v1` HTTP surface. Any
//! endpoint that accepts the same shapes (a proxy, a local server) works
//! by pointing `url` at it in the config.

use crate::audio::wav::encode_wav;
use crate::config::ProviderConfig;
use crate::error::{Result, VocoachError};
use crate::providers::dialogue::{DialogueModel, Message, TextStream};
use crate::providers::synthesizer::{AudioStream, SpeechSynthesizer};
use crate::providers::transcriber::Transcriber;
use crate::providers::{error_from_response, http_client};
use crate::streaming::merger::Word;
use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

fn base_url(config: &ProviderConfig) -> String {
    config
        .url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Speech-to-text via the `/audio/transcriptions` endpoint.
pub struct OpenAiTranscriber {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    sample_rate: u32,
}

impl OpenAiTranscriber {
    pub fn new(config: &ProviderConfig, sample_rate: u32) -> Result<Self> {
        Ok(Self {
            client: http_client(),
            base_url: base_url(config),
            model: config.model.clone(),
            api_key: config.api_key()?,
            sample_rate,
        })
    }

    fn form(&self, samples: &[i16]) -> Result<reqwest::multipart::Form> {
        let wav = encode_wav(samples, self.sample_rate)?;
        let part = reqwest::multipart::Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| VocoachError::AudioConversion {
                message: format!("Failed to build upload part: {}", e),
            })?;
        Ok(reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    words: Vec<TimedWord>,
}

#[derive(Debug, Deserialize)]
struct TimedWord {
    word: String,
    start: f64,
    end: f64,
}

fn parse_timed_words(body: &str) -> Result<Vec<Word>> {
    let parsed: VerboseTranscription =
        serde_json::from_str(body).map_err(|e| VocoachError::Transcription {
            message: format!("Malformed transcription response: {}", e),
        })?;

    Ok(parsed
        .words
        .into_iter()
        .map(|w| Word::new(w.word, w.start, w.end))
        .collect())
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, samples: &[i16], context: Option<&str>) -> Result<String> {
        let mut form = self.form(samples)?.text("response_format", "text");
        if let Some(context) = context {
            form = form.text("prompt", context.to_string());
        }

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.text().await?.trim().to_string())
    }

    async fn transcribe_timed(&self, samples: &[i16]) -> Result<Vec<Word>> {
        let form = self
            .form(samples)?
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        parse_timed_words(&response.text().await?)
    }
}

/// Text-to-speech via the `/audio/speech` endpoint.
pub struct OpenAiSynthesizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    voice: String,
}

impl OpenAiSynthesizer {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(),
            base_url: base_url(config),
            model: config.model.clone(),
            api_key: config.api_key()?,
            voice: "alloy".to_string(),
        })
    }

    fn request(&self, text: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "input": text,
                "voice": self.voice,
                "response_format": "opus",
            }))
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self.request(text).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn synthesize_stream(&self, text: &str) -> Result<AudioStream> {
        let response = self.request(text).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            while let Some(item) = stream.next().await {
                let chunk = match item {
                    Ok(bytes) => Ok(bytes.to_vec()),
                    Err(e) => Err(VocoachError::from(e)),
                };
                let failed = chunk.is_err();
                if tx.send(chunk).await.is_err() || failed {
                    break;
                }
            }
        });

        Ok(rx)
    }
}

/// Chat completion via the `/chat/completions` endpoint.
pub struct OpenAiDialogue {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiDialogue {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(),
            base_url: base_url(config),
            model: config.model.clone(),
            api_key: config.api_key()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the delta text from one `data:` SSE line, if any.
fn parse_stream_line(line: &str) -> Option<String> {
    let data = line.trim().strip_prefix("data: ")?;
    if data == "[DONE]" {
        return None;
    }
    let chunk: StreamChunk = serde_json::from_str(data).ok()?;
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|content| !content.is_empty())
}

#[async_trait]
impl DialogueModel for OpenAiDialogue {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "messages": messages,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| VocoachError::Dialogue {
                    message: format!("Malformed chat response: {}", e),
                })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| VocoachError::Dialogue {
                message: "Chat response contained no choices".to_string(),
            })
    }

    async fn complete_stream(&self, messages: &[Message]) -> Result<TextStream> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "messages": messages,
                "stream": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = Vec::new();

            while let Some(item) = stream.next().await {
                let bytes = match item {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(Err(VocoachError::from(e))).await;
                        return;
                    }
                };

                buffer.extend_from_slice(&bytes);
                while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&line);
                    if let Some(delta) = parse_stream_line(&line)
                        && tx.send(Ok(delta)).await.is_err()
                    {
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}
