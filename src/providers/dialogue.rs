use crate::error::{Result, VocoachError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Who said what in a dialogue exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Text deltas delivered incrementally; end of stream is channel close.
pub type TextStream = mpsc::Receiver<Result<String>>;

/// Trait for the dialogue (chat) model behind the interviewer.
#[async_trait]
pub trait DialogueModel: Send + Sync {
    /// Generate a reply for the given conversation.
    async fn complete(&self, messages: &[Message]) -> Result<String>;

    /// Generate a reply as an incremental delta stream.
    ///
    /// The default implementation wraps [`complete`] in a single-delta
    /// stream; adapters with real token streaming override it.
    ///
    /// [`complete`]: DialogueModel::complete
    async fn complete_stream(&self, messages: &[Message]) -> Result<TextStream> {
        let reply = self.complete(messages).await?;
        let (tx, rx) = mpsc::channel(1);
        let _ = tx.send(Ok(reply)).await;
        Ok(rx)
    }
}

/// Mock dialogue model for testing.
///
/// Replies are consumed from a queue so multi-turn tests can script the
/// whole exchange; an exhausted queue falls back to a fixed reply.
#[derive(Debug)]
pub struct MockDialogue {
    replies: std::sync::Mutex<std::collections::VecDeque<String>>,
    fallback: String,
    should_fail: bool,
}

impl MockDialogue {
    /// Create a new mock dialogue model with default settings.
    pub fn new() -> Self {
        Self {
            replies: std::sync::Mutex::new(std::collections::VecDeque::new()),
            fallback: "mock reply".to_string(),
            should_fail: false,
        }
    }

    /// Queue a reply; each `complete` call pops one.
    pub fn with_reply(self, reply: &str) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply.to_string());
        self
    }

    /// Configure the mock to fail on every call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl DialogueModel for MockDialogue {
    async fn complete(&self, _messages: &[Message]) -> Result<String> {
        if self.should_fail {
            return Err(VocoachError::Dialogue {
                message: "mock dialogue failure".to_string(),
            });
        }
        Ok(self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}
