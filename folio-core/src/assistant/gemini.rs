//! Gemini backend for the assistant
//!
//! One `generateContent` call per turn, carrying the system instruction and
//! the whole conversation so far.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::backend::ChatBackend;
use super::types::{ChatMessage, Role};
use crate::config::AssistantConfig;

/// Generative language API backend
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    /// Create a backend, reading the API key from the variable named in config
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .with_context(|| {
                format!(
                    "Assistant requires {} environment variable to be set",
                    config.api_key_env
                )
            })?;
        Self::with_api_key(config, api_key)
    }

    /// Create a backend with an explicit API key
    pub fn with_api_key(config: &AssistantConfig, api_key: impl Into<String>) -> Result<Self> {
        // Generation can be slow; never go below 5 seconds
        const MIN_TIMEOUT_SECONDS: u64 = 5;
        let timeout_seconds = if config.timeout_seconds < MIN_TIMEOUT_SECONDS {
            warn!(
                "Configured timeout_seconds={} is too low; using minimum of {} seconds",
                config.timeout_seconds, MIN_TIMEOUT_SECONDS
            );
            MIN_TIMEOUT_SECONDS
        } else {
            config.timeout_seconds
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn text(role: Option<Role>, text: &'a str) -> Self {
        Self {
            role: role.map(|r| r.as_str()),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatBackend for GeminiBackend {
    async fn send(&self, system: &str, history: &[ChatMessage], message: &str) -> Result<String> {
        debug!(
            "Assistant sending message via Gemini ({}), {} prior turns",
            self.model,
            history.len()
        );

        let mut contents: Vec<Content<'_>> = history
            .iter()
            .map(|m| Content::text(Some(m.role), &m.text))
            .collect();
        contents.push(Content::text(Some(Role::User), message));

        let request = GenerateRequest {
            system_instruction: Content::text(None, system),
            contents,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API error: {} - {}", status, body);
            return Err(anyhow::anyhow!("Gemini API error: {} - {}", status, body));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let text = generated.text();
        debug!("Assistant raw reply ({} chars)", text.len());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn override_model(&mut self, model: String) {
        self.model = model;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let history = vec![ChatMessage::user("hi"), ChatMessage::model("hello")];
        let mut contents: Vec<Content<'_>> = history
            .iter()
            .map(|m| Content::text(Some(m.role), &m.text))
            .collect();
        contents.push(Content::text(Some(Role::User), "next"));

        let request = GenerateRequest {
            system_instruction: Content::text(None, "sys"),
            contents,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "systemInstruction": {"parts": [{"text": "sys"}]},
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]},
                    {"role": "user", "parts": [{"text": "next"}]}
                ]
            })
        );
    }

    #[test]
    fn test_response_text() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "a"}, {"text": "b"}]}}]
        }))
        .unwrap();
        assert_eq!(response.text(), "ab");

        let empty: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_timeout_floor() {
        let config = AssistantConfig {
            timeout_seconds: 1,
            ..Default::default()
        };
        assert!(GeminiBackend::with_api_key(&config, "k").is_ok());
    }

    #[test]
    fn test_endpoint() {
        let config = AssistantConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..Default::default()
        };
        let backend = GeminiBackend::with_api_key(&config, "k").unwrap();
        assert_eq!(
            backend.endpoint(),
            "http://localhost:1234/models/gemini-2.5-flash:generateContent"
        );
    }
}
