//! Site configuration
//!
//! Loaded from a YAML file. Lookup order:
//!
//! 1. An explicit path (CLI `--config`)
//! 2. `$FOLIO_CONFIG`
//! 3. The platform config dir, e.g. `~/.config/folio/config.yaml`
//! 4. Built-in defaults when no file exists
//!
//! ```yaml
//! store:
//!   backend: firestore
//!   project_id: graphicvortex-1e1e3
//!   api_key_env: FOLIO_FIREBASE_API_KEY
//!   id_token_env: FOLIO_FIREBASE_ID_TOKEN
//! assistant:
//!   model: gemini-2.5-flash
//!   api_key_env: GEMINI_API_KEY
//! catalog:
//!   collection: projects
//!   page_size: 10
//! ```
//!
//! Secrets never live in this file, only the names of the environment
//! variables that hold them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that points at a config file
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Which document store backs the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Firestore,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Firebase project id
    #[serde(default = "default_project_id")]
    pub project_id: Option<String>,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_store_url")]
    pub base_url: String,

    /// Environment variable holding the web API key
    #[serde(default = "default_store_key_env")]
    pub api_key_env: String,

    /// Environment variable holding the admin's ID token, if any
    #[serde(default)]
    pub id_token_env: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            project_id: default_project_id(),
            database: default_database(),
            base_url: default_store_url(),
            api_key_env: default_store_key_env(),
            id_token_env: None,
            timeout_seconds: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_assistant_url")]
    pub base_url: String,

    /// Environment variable holding the generative API key
    #[serde(default = "default_assistant_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Replaces the generated system instruction when set
    #[serde(default)]
    pub system_instruction: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            base_url: default_assistant_url(),
            api_key_env: default_assistant_key_env(),
            timeout_seconds: default_timeout(),
            system_instruction: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Collection holding uploaded projects
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Entries shown before "show more"
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Width requested when rewriting Drive links
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            page_size: default_page_size(),
            thumbnail_width: default_thumbnail_width(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_project_id() -> Option<String> {
    Some("graphicvortex-1e1e3".to_string())
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_store_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_store_key_env() -> String {
    "FOLIO_FIREBASE_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_assistant_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_assistant_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_collection() -> String {
    "projects".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_thumbnail_width() -> u32 {
    crate::link::DEFAULT_THUMBNAIL_WIDTH
}

impl SiteConfig {
    /// Load from an explicit path, `$FOLIO_CONFIG`, or the default location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var(CONFIG_ENV)
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .or_else(Self::default_path),
        };

        match path {
            Some(path) => Self::load_from_path(&path),
            None => {
                debug!("No config location available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content).context("Invalid site configuration YAML")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).context("Failed to serialize site configuration")
    }

    /// `config.yaml` in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "graphicvortex", "folio")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::config_dir().map(|d| d.join("folio")))
            .map(|dir| dir.join("config.yaml"))
    }
}
