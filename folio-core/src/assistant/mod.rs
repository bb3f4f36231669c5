//! Portfolio assistant - chat with a generative model about the owner's work
//!
//! ## Configuration
//!
//! ```yaml
//! assistant:
//!   enabled: true
//!   model: gemini-2.5-flash
//!   api_key_env: GEMINI_API_KEY
//! ```
//!
//! Without an API key the assistant stays offline and answers every message
//! with a fixed notice. [`Assistant::reply`] never returns an error; backend
//! failures are logged and turned into a fallback reply.

pub mod backend;
pub mod prompts;
pub mod types;

#[cfg(feature = "assistant")]
pub mod gemini;

pub use backend::ChatBackend;
pub use prompts::{system_instruction, ASSISTANT_NAME};
pub use types::{ChatMessage, Role, EMPTY_REPLY, ERROR_REPLY, OFFLINE_REPLY, WELCOME_TEXT};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::AssistantConfig;
use crate::profile::Profile;
use crate::project::Project;

#[derive(Debug, Default)]
struct Session {
    /// Turns the model has seen, oldest first
    history: Vec<ChatMessage>,
    /// Everything shown to the visitor, fallbacks included
    transcript: Vec<ChatMessage>,
}

/// A single chat session
pub struct Assistant {
    system_instruction: String,
    backend: Option<Box<dyn ChatBackend>>,
    session: Mutex<Session>,
}

impl Assistant {
    /// An assistant with no backend; every reply is [`OFFLINE_REPLY`]
    pub fn offline(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            backend: None,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn with_backend(system_instruction: impl Into<String>, backend: Box<dyn ChatBackend>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::offline(system_instruction)
        }
    }

    /// Build from configuration, with context from `profile` and `projects`
    ///
    /// A missing key or a disabled assistant yields an offline session rather
    /// than an error.
    pub fn from_config(config: &AssistantConfig, profile: &Profile, projects: &[Project]) -> Self {
        let instruction = config
            .system_instruction
            .clone()
            .unwrap_or_else(|| system_instruction(profile, projects));

        if !config.enabled {
            debug!("Assistant is disabled");
            return Self::offline(instruction);
        }

        #[cfg(feature = "assistant")]
        {
            match gemini::GeminiBackend::new(config) {
                Ok(backend) => {
                    info!("Initializing assistant with Gemini backend (model: {})", config.model);
                    Self::with_backend(instruction, Box::new(backend))
                }
                Err(e) => {
                    warn!("Assistant offline: {:#}", e);
                    Self::offline(instruction)
                }
            }
        }

        #[cfg(not(feature = "assistant"))]
        {
            warn!("Assistant is enabled in config but the 'assistant' feature is not compiled in");
            Self::offline(instruction)
        }
    }

    pub fn is_online(&self) -> bool {
        self.backend.is_some()
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Override the model at runtime (CLI --model)
    pub fn override_model(&mut self, model: String) {
        if let Some(backend) = self.backend.as_mut() {
            backend.override_model(model);
        }
    }

    /// Answer a visitor message
    ///
    /// Successful turns are kept and sent with the next message. Fallback
    /// replies appear in the transcript but never in the model's history.
    pub async fn reply(&self, message: &str) -> String {
        let mut session = self.session.lock().await;
        session.transcript.push(ChatMessage::user(message));

        let reply = match &self.backend {
            None => OFFLINE_REPLY.to_string(),
            Some(backend) => {
                match backend
                    .send(&self.system_instruction, &session.history, message)
                    .await
                {
                    Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
                    Ok(text) => {
                        session.history.push(ChatMessage::user(message));
                        session.history.push(ChatMessage::model(text.clone()));
                        text
                    }
                    Err(e) => {
                        warn!("Assistant {} backend error: {:#}", backend.name(), e);
                        ERROR_REPLY.to_string()
                    }
                }
            }
        };

        session.transcript.push(ChatMessage::model(reply.clone()));
        reply
    }

    /// Welcome message followed by every exchanged message
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        let session = self.session.lock().await;
        std::iter::once(ChatMessage::welcome())
            .chain(session.transcript.iter().cloned())
            .collect()
    }

    /// Number of turns the model has seen
    pub async fn history_len(&self) -> usize {
        self.session.lock().await.history.len()
    }

    /// Start a fresh conversation
    pub async fn reset(&self) {
        *self.session.lock().await = Session::default();
    }
}
