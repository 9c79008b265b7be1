use crate::error::{Result, VocoachError};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Audio bytes delivered incrementally; end of stream is channel close.
///
/// Cancellation is dropping the receiver; the producer task notices the
/// closed channel and stops.
pub type AudioStream = mpsc::Receiver<Result<Vec<u8>>>;

/// Trait for text-to-speech synthesis.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize text into a complete audio byte buffer.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    /// Synthesize text as a chunked audio stream.
    ///
    /// The default implementation wraps [`synthesize`] in a single-chunk
    /// stream; adapters with real chunked responses override it.
    ///
    /// [`synthesize`]: SpeechSynthesizer::synthesize
    async fn synthesize_stream(&self, text: &str) -> Result<AudioStream> {
        let audio = self.synthesize(text).await?;
        let (tx, rx) = mpsc::channel(1);
        let _ = tx.send(Ok(audio)).await;
        Ok(rx)
    }
}

/// Mock synthesizer for testing.
#[derive(Debug, Clone)]
pub struct MockSynthesizer {
    audio: Vec<u8>,
    should_fail: bool,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer with default settings.
    pub fn new() -> Self {
        Self {
            audio: vec![0u8; 16],
            should_fail: false,
        }
    }

    /// Configure the mock to return specific audio bytes.
    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = audio;
        self
    }

    /// Configure the mock to fail on synthesize.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        if self.should_fail {
            return Err(VocoachError::Synthesis {
                message: "mock synthesis failure".to_string(),
            });
        }
        Ok(self.audio.clone())
    }
}
