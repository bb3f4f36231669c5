//! Catalog service - merged reads and sanitized writes
//!
//! Reads degrade: if the store fails, the static portfolio is still
//! returned and the failure rides along in [`CatalogListing`]. Writes do
//! not: every store failure is classified into a [`SubmitError`] with a
//! message the operator can act on.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::static_entries::static_projects;
use crate::config::SiteConfig;
use crate::link::LinkNormalizer;
use crate::project::{format_timestamp, Project, ProjectDetails};
use crate::store::{open_store, Direction, DocumentStore, Fields, StoreError};

/// Default collection for uploaded projects
pub const DEFAULT_COLLECTION: &str = "projects";

/// Field used for newest-first ordering
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Result of [`CatalogService::list_all`]
///
/// `projects` is always usable. `failure` is set when the remote fetch
/// failed and only the static entries are present.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogListing {
    pub projects: Vec<Project>,
    pub failure: Option<StoreError>,
    /// Entries that came from the store
    pub remote_count: usize,
    /// Stored documents that could not be decoded
    pub skipped: usize,
}

impl CatalogListing {
    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }

    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }
}

/// Submission failures, each with its own operator-facing message
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    #[error("No image link provided")]
    MissingImageLink,

    #[error("Permission denied by the store: {0}")]
    AccessDenied(String),

    #[error("Store not provisioned: {0}")]
    NotProvisioned(String),

    #[error("Store error: {}", .0.as_deref().unwrap_or("unknown"))]
    Backend(Option<String>),
}

impl SubmitError {
    /// Message suitable for showing to the person who submitted
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::MissingImageLink => "Please provide an image link.".to_string(),
            SubmitError::AccessDenied(_) => "Permission denied: the store's security rules \
                rejected this write. Check that the admin account may write to the projects \
                collection."
                .to_string(),
            SubmitError::NotProvisioned(_) => "The project database has not been created yet. \
                Create the Firestore database for this project, then try again."
                .to_string(),
            SubmitError::Backend(Some(message)) if !message.trim().is_empty() => message.clone(),
            SubmitError::Backend(_) => "Failed to upload project.".to_string(),
        }
    }
}

impl From<StoreError> for SubmitError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::PermissionDenied(message) => SubmitError::AccessDenied(message),
            StoreError::NotProvisioned(message) => SubmitError::NotProvisioned(message),
            StoreError::Backend { message, .. } => {
                SubmitError::Backend(Some(message).filter(|m| !m.trim().is_empty()))
            }
            StoreError::NotConfigured(message)
            | StoreError::Transport(message)
            | StoreError::Decode(message) => SubmitError::Backend(Some(message)),
        }
    }
}

/// Drop fields that are absent or empty strings
///
/// A reader later sees either a populated field or no field at all.
pub fn sanitize(details: &ProjectDetails) -> Fields {
    let mut fields = match serde_json::to_value(details) {
        Ok(Value::Object(map)) => map,
        _ => Fields::new(),
    };
    fields.retain(|_, value| match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    });
    fields
}

/// Stateless façade over the document store and the static catalog
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
    static_entries: Vec<Project>,
    normalizer: LinkNormalizer,
    collection: String,
}

impl CatalogService {
    /// Create a service over `store` with the compiled-in static entries
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            static_entries: static_projects().to_vec(),
            normalizer: LinkNormalizer::default(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Service over the store, collection and link width named in `config`
    pub fn from_config(config: &SiteConfig) -> anyhow::Result<Self> {
        let store = open_store(&config.store)?;
        Ok(Self::new(store)
            .with_collection(config.catalog.collection.clone())
            .with_normalizer(LinkNormalizer::with_width(config.catalog.thumbnail_width)))
    }

    /// Replace the static entries shown below uploaded ones
    pub fn with_static_entries(mut self, entries: Vec<Project>) -> Self {
        self.static_entries = entries;
        self
    }

    pub fn with_normalizer(mut self, normalizer: LinkNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn static_entries(&self) -> &[Project] {
        &self.static_entries
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn normalizer(&self) -> &LinkNormalizer {
        &self.normalizer
    }

    /// All projects: uploaded (newest first) followed by static ones
    ///
    /// Never fails. On a store error the static entries are returned alone
    /// and the error is kept in [`CatalogListing::failure`].
    pub async fn list_all(&self) -> CatalogListing {
        let documents = match self
            .store
            .query_ordered(&self.collection, CREATED_AT_FIELD, Direction::Descending)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                warn!(
                    "Failed to fetch projects from {} store, showing static entries only: {}",
                    self.store.name(),
                    e
                );
                return CatalogListing {
                    projects: self.static_entries.clone(),
                    failure: Some(e),
                    remote_count: 0,
                    skipped: 0,
                };
            }
        };

        let mut skipped = 0;
        let mut projects = Vec::with_capacity(documents.len() + self.static_entries.len());

        for document in documents {
            match Project::from_document(&document.id, document.fields) {
                Ok(mut project) => {
                    // Older uploads may predate normalization
                    project.image_url = self.normalizer.normalize(&project.image_url);
                    projects.push(project);
                }
                Err(e) => {
                    warn!("Skipping stored project '{}': {}", document.id, e);
                    skipped += 1;
                }
            }
        }

        let remote_count = projects.len();
        debug!(
            "Fetched {} uploaded projects ({} skipped), {} static",
            remote_count,
            skipped,
            self.static_entries.len()
        );

        projects.extend(self.static_entries.iter().cloned());

        CatalogListing {
            projects,
            failure: None,
            remote_count,
            skipped,
        }
    }

    /// Persist a new project and return its store-assigned id
    pub async fn submit(
        &self,
        raw_image_link: &str,
        details: &ProjectDetails,
    ) -> Result<String, SubmitError> {
        self.submit_at(raw_image_link, details, Utc::now()).await
    }

    /// [`submit`](Self::submit) with an explicit creation time
    pub async fn submit_at(
        &self,
        raw_image_link: &str,
        details: &ProjectDetails,
        created_at: DateTime<Utc>,
    ) -> Result<String, SubmitError> {
        let raw_image_link = raw_image_link.trim();
        if raw_image_link.is_empty() {
            return Err(SubmitError::MissingImageLink);
        }

        let image_url = self.normalizer.normalize(raw_image_link);

        let mut fields = sanitize(details);
        fields.insert("imageUrl".to_string(), Value::String(image_url));
        fields.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(format_timestamp(created_at)),
        );

        let id = self
            .store
            .insert(&self.collection, fields)
            .await
            .map_err(|e| {
                warn!("Failed to submit project '{}': {}", details.title, e);
                SubmitError::from(e)
            })?;

        info!(
            "Submitted project '{}' ({}) as {}",
            details.title, details.category, id
        );
        Ok(id)
    }
}
