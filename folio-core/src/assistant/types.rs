//! Chat message types shared by the assistant and its backends

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reply when no API key is available
pub const OFFLINE_REPLY: &str = "I'm currently offline (API Key missing). Please check back later!";

/// Reply when the model returns no text
pub const EMPTY_REPLY: &str = "I didn't catch that. Could you rephrase?";

/// Reply when the backend call fails
pub const ERROR_REPLY: &str = "Sorry, I'm having trouble connecting to my creative brain right now.";

/// Greeting shown before the visitor says anything
pub const WELCOME_TEXT: &str = "Hi there! I'm GraphicVortex, Akash's AI design assistant. \
Ask me anything about Akash's portfolio, style, or availability!";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Role name on the generative API wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    /// The greeting the chat opens with; never sent to the model
    pub fn welcome() -> Self {
        Self {
            id: "welcome".to_string(),
            ..Self::model(WELCOME_TEXT)
        }
    }
}
