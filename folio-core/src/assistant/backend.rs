//! Chat backend trait - abstraction over generative model providers
//!
//! - Gemini (HTTP API)
//! - Mock (testing)

use anyhow::Result;
use async_trait::async_trait;

use super::types::ChatMessage;

/// A provider that continues a conversation
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produce the model's reply to `message`
    ///
    /// `history` holds the earlier turns, oldest first, without `message`.
    /// An empty string means the model had nothing to say.
    async fn send(&self, system: &str, history: &[ChatMessage], message: &str) -> Result<String>;

    /// Backend identifier for logging
    fn name(&self) -> &'static str;

    /// Override the model at runtime (e.g. from CLI --model)
    fn override_model(&mut self, model: String);
}

/// Mock backend for testing
#[cfg(test)]
pub struct MockBackend {
    pub reply: std::result::Result<String, String>,
    /// (history length, message) per call
    pub seen: std::sync::Arc<std::sync::Mutex<Vec<(usize, String)>>>,
}

#[cfg(test)]
impl MockBackend {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            seen: Default::default(),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            seen: Default::default(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ChatBackend for MockBackend {
    async fn send(&self, _system: &str, history: &[ChatMessage], message: &str) -> Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((history.len(), message.to_string()));
        self.reply.clone().map_err(|e| anyhow::anyhow!(e))
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn override_model(&mut self, _model: String) {}
}
