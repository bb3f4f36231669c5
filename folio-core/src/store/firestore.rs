//! Cloud Firestore REST backend
//!
//! Implements [`DocumentStore`] with two REST calls:
//!
//! ```text
//! POST {base}/projects/{project}/databases/{db}/documents:runQuery      ← ordered read
//! POST {base}/projects/{project}/databases/{db}/documents/{collection}  ← insert, auto id
//! ```
//!
//! Authentication is either a web API key (`?key=`), a bearer ID token from
//! the admin sign-in, or both. Which writes succeed is decided by the
//! project's security rules, not by this client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::values::{decode_fields, encode_fields};
use super::{Direction, DocumentStore, Fields, StoreError, StoredDocument};
use crate::config::StoreConfig;

/// Production REST endpoint
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Firestore REST client scoped to one database
pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    database: String,
    api_key: Option<String>,
    bearer_token: Option<String>,
}

impl FirestoreStore {
    /// Create a store for `project_id` on the default database
    pub fn new(project_id: impl Into<String>) -> Result<Self> {
        Self::with_timeout(project_id, Duration::from_secs(30))
    }

    /// Create a store with an explicit request timeout
    pub fn with_timeout(project_id: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: DEFAULT_FIRESTORE_URL.to_string(),
            project_id: project_id.into(),
            database: "(default)".to_string(),
            api_key: None,
            bearer_token: None,
        })
    }

    /// Build a store from the site configuration
    ///
    /// Secrets are read from the environment variables the config names.
    /// A missing API key is tolerated (rules may allow public reads); a
    /// missing bearer token just means writes go out unauthenticated.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|p| !p.is_empty())
            .context("Firestore store requires store.project_id to be set")?;

        let mut store = Self::with_timeout(project_id, Duration::from_secs(config.timeout_seconds))?
            .with_base_url(&config.base_url)
            .with_database(&config.database);

        match std::env::var(&config.api_key_env) {
            Ok(key) if !key.is_empty() => store = store.with_api_key(key),
            _ => debug!("{} not set, querying Firestore without an API key", config.api_key_env),
        }

        if let Some(token_env) = &config.id_token_env {
            match std::env::var(token_env) {
                Ok(token) if !token.is_empty() => store = store.with_bearer_token(token),
                _ => warn!("{} not set, writes will be sent unauthenticated", token_env),
            }
        }

        Ok(store)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// `.../projects/{p}/databases/{db}/documents`
    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.base_url, self.project_id, self.database
        )
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.post(url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, url: &str, body: &Value) -> Result<Value, StoreError> {
        let response = self
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!("Firestore API error: {} - {}", status, text);
            return Err(classify_error(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<Document>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Option<Value>,
}

impl Document {
    /// Last path segment of the resource name is the document id
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Map a Firestore error response to a [`StoreError`]
pub(crate) fn classify_error(http_status: u16, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error)
        .or_else(|_| {
            serde_json::from_str::<Vec<ErrorEnvelope>>(body)
                .ok()
                .and_then(|mut items| items.pop())
                .map(|e| e.error)
                .ok_or(())
        });

    match parsed {
        Ok(error) => classify_parts(http_status, &error.status, error.message),
        Err(()) => classify_parts(http_status, "", body.trim().to_string()),
    }
}

fn classify_parts(http_status: u16, status: &str, message: String) -> StoreError {
    let lower = message.to_lowercase();

    let database_missing = lower.contains("database") && lower.contains("does not exist");
    let api_disabled = lower.contains("has not been used") || lower.contains("is disabled");

    if database_missing || api_disabled {
        return StoreError::NotProvisioned(message);
    }

    if http_status == 401
        || http_status == 403
        || status == "PERMISSION_DENIED"
        || status == "UNAUTHENTICATED"
    {
        return StoreError::PermissionDenied(message);
    }

    StoreError::Backend {
        status: http_status,
        message,
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn query_ordered(
        &self,
        collection: &str,
        order_by: &str,
        direction: Direction,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let direction = match direction {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        };

        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "orderBy": [{ "field": { "fieldPath": order_by }, "direction": direction }]
            }
        });

        let url = format!("{}:runQuery", self.documents_url());
        let response = self.send(&url, &body).await?;

        let items: Vec<RunQueryItem> =
            serde_json::from_value(response).map_err(|e| StoreError::Decode(e.to_string()))?;

        let mut documents = Vec::with_capacity(items.len());
        for item in items {
            if let Some(error) = item.error {
                return Err(classify_parts(200, &error.status, error.message));
            }

            // Items without a document only carry read metadata
            let Some(document) = item.document else {
                continue;
            };

            let fields = match document.fields.as_ref().map(decode_fields) {
                Some(Ok(fields)) => fields,
                Some(Err(e)) => {
                    warn!("Skipping undecodable document '{}': {}", document.id(), e);
                    continue;
                }
                None => Fields::new(),
            };

            documents.push(StoredDocument {
                id: document.id().to_string(),
                fields,
            });
        }

        debug!(
            "Firestore query on '{}' returned {} documents",
            collection,
            documents.len()
        );
        Ok(documents)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = format!("{}/{}", self.documents_url(), collection);
        let body = json!({ "fields": encode_fields(&fields) });

        let response = self.send(&url, &body).await?;
        let document: Document =
            serde_json::from_value(response).map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(document.id().to_string())
    }

    fn name(&self) -> &'static str {
        "firestore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_permission_denied() {
        let body = r#"{"error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(
            classify_error(403, body),
            StoreError::PermissionDenied("Missing or insufficient permissions.".to_string())
        );
    }

    #[test]
    fn test_classify_missing_database() {
        let body = r#"{"error": {"code": 404, "message": "The database (default) does not exist for project demo", "status": "NOT_FOUND"}}"#;
        assert!(matches!(
            classify_error(404, body),
            StoreError::NotProvisioned(_)
        ));
    }

    #[test]
    fn test_classify_disabled_api_before_permission() {
        let body = r#"{"error": {"code": 403, "message": "Cloud Firestore API has not been used in project demo before or it is disabled.", "status": "PERMISSION_DENIED"}}"#;
        assert!(matches!(
            classify_error(403, body),
            StoreError::NotProvisioned(_)
        ));
    }

    #[test]
    fn test_classify_array_wrapped_error() {
        let body = r#"[{"error": {"code": 400, "message": "Bad query", "status": "INVALID_ARGUMENT"}}]"#;
        assert_eq!(
            classify_error(400, body),
            StoreError::Backend {
                status: 400,
                message: "Bad query".to_string()
            }
        );
    }

    #[test]
    fn test_classify_unparseable_body() {
        assert_eq!(
            classify_error(502, "Bad Gateway\n"),
            StoreError::Backend {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn test_document_id_from_name() {
        let document = Document {
            name: "projects/demo/databases/(default)/documents/projects/abc123".to_string(),
            fields: None,
        };
        assert_eq!(document.id(), "abc123");
    }
}
