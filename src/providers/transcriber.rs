use crate::error::{Result, VocoachError};
use crate::streaming::merger::Word;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping provider backends (and mocks in tests).
/// Audio is 16-bit mono PCM; the adapter owns the WAV packaging and the
/// sample rate it advertises to the provider.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a whole recording to plain text.
    ///
    /// `context` carries prior conversation text some providers accept
    /// as a decoding hint.
    async fn transcribe(&self, samples: &[i16], context: Option<&str>) -> Result<String>;

    /// Transcribe a segment to words with segment-local timestamps.
    ///
    /// Words are ordered by ascending start time. This is the streaming
    /// mode input for the transcript merger.
    async fn transcribe_timed(&self, samples: &[i16]) -> Result<Vec<Word>>;
}

/// Implement Transcriber for Arc<T> to allow sharing across turns.
#[async_trait]
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    async fn transcribe(&self, samples: &[i16], context: Option<&str>) -> Result<String> {
        (**self).transcribe(samples, context).await
    }

    async fn transcribe_timed(&self, samples: &[i16]) -> Result<Vec<Word>> {
        (**self).transcribe_timed(samples).await
    }
}

/// Implement Transcriber for Box<T> so factory-built backends plug in.
#[async_trait]
impl<T: Transcriber + ?Sized> Transcriber for Box<T> {
    async fn transcribe(&self, samples: &[i16], context: Option<&str>) -> Result<String> {
        (**self).transcribe(samples, context).await
    }

    async fn transcribe_timed(&self, samples: &[i16]) -> Result<Vec<Word>> {
        (**self).transcribe_timed(samples).await
    }
}

/// Mock transcriber for testing.
///
/// Plain-text responses are fixed; timed responses are consumed from a
/// queue so consecutive segments can return different word lists (or a
/// scripted failure).
#[derive(Debug)]
pub struct MockTranscriber {
    response: String,
    timed: std::sync::Mutex<std::collections::VecDeque<Result<Vec<Word>>>>,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings.
    pub fn new() -> Self {
        Self {
            response: "mock transcription".to_string(),
            timed: std::sync::Mutex::new(std::collections::VecDeque::new()),
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific plain-text response.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Queue a timed word list; each `transcribe_timed` call pops one.
    pub fn with_words(self, words: Vec<Word>) -> Self {
        self.timed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(Ok(words));
        self
    }

    /// Queue a one-off failure for the next `transcribe_timed` call.
    pub fn with_timed_failure(self) -> Self {
        self.timed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(Err(VocoachError::Transcription {
                message: "mock transcription failure".to_string(),
            }));
        self
    }

    /// Configure the mock to fail on every call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _samples: &[i16], _context: Option<&str>) -> Result<String> {
        if self.should_fail {
            return Err(VocoachError::Transcription {
                message: "mock transcription failure".to_string(),
            });
        }
        Ok(self.response.clone())
    }

    async fn transcribe_timed(&self, _samples: &[i16]) -> Result<Vec<Word>> {
        if self.should_fail {
            return Err(VocoachError::Transcription {
                message: "mock transcription failure".to_string(),
            });
        }
        self.timed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
