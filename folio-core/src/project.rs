//! Project entries - the unit of the portfolio catalog
//!
//! Field names serialize in camelCase so that stored documents keep the
//! shape the site has always written (`imageUrl`, `createdAt`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout hint for a project image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
    Square,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Square => "square",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            "square" => Ok(Orientation::Square),
            other => Err(format!(
                "Unknown orientation '{other}'. Expected portrait, landscape or square"
            )),
        }
    }
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Author-assigned for static entries, store-assigned for uploads
    pub id: String,

    /// Display name
    pub title: String,

    /// Free-form classification, the only filter key
    pub category: String,

    /// Directly renderable image URL (always normalized)
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Free text, not a structured date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Display order is meaningful, nothing else is
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Layout hint only; unrecognized values read as absent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_orientation"
    )]
    pub orientation: Option<Orientation>,

    /// Set on upload, used only for newest-first ordering
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Whether this entry came from the remote store
    pub fn is_dynamic(&self) -> bool {
        self.created_at.is_some()
    }

    /// Orientation with the portrait default applied
    pub fn layout(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    /// Decode a stored document into a project, taking the id from the store
    pub fn from_document(
        id: &str,
        mut fields: serde_json::Map<String, serde_json::Value>,
    ) -> serde_json::Result<Self> {
        fields.insert("id".to_string(), serde_json::Value::String(id.to_string()));
        serde_json::from_value(serde_json::Value::Object(fields))
    }
}

/// Submission field set: everything except `id` and `imageUrl`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub title: String,
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl ProjectDetails {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Default::default()
        }
    }
}

/// Format a timestamp the way uploads store `createdAt`
///
/// Millisecond precision with a `Z` suffix, so lexical order matches
/// chronological order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accept any RFC 3339 string; anything else is treated as missing
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

fn lenient_orientation<'de, D>(deserializer: D) -> Result<Option<Orientation>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok()))
}
