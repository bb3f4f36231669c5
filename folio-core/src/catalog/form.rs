//! Admin upload form
//!
//! Everything arrives as text. Tools and tags are comma separated; empty
//! inputs become absent fields before the submission reaches the service.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::link::LinkNormalizer;
use crate::project::{Orientation, ProjectDetails};

/// Message shown when required inputs are missing
pub const FORM_INCOMPLETE_MESSAGE: &str =
    "Please fill in required fields and provide an image link.";

/// Raw form inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub image_link: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub client: String,
    pub year: String,
    /// Comma separated
    pub tools: String,
    /// Comma separated
    pub tags: String,
    pub orientation: Orientation,
}

/// Required inputs that were left blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub missing: Vec<&'static str>,
}

impl FormError {
    pub fn user_message(&self) -> &'static str {
        FORM_INCOMPLETE_MESSAGE
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing required fields: {}", self.missing.join(", "))
    }
}

impl std::error::Error for FormError {}

/// Split a comma separated list, trimming entries and dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl SubmissionForm {
    /// Check that title, category and image link are present
    pub fn validate(&self) -> Result<(), FormError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.image_link.trim().is_empty() {
            missing.push("image link");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError { missing })
        }
    }

    /// Details for submission; `default_year` fills a blank year
    pub fn to_details(&self, default_year: Option<&str>) -> ProjectDetails {
        let tools = split_list(&self.tools);
        let tags = split_list(&self.tags);

        ProjectDetails {
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            description: non_empty(&self.description),
            client: non_empty(&self.client),
            year: non_empty(&self.year).or_else(|| default_year.and_then(non_empty)),
            tools: (!tools.is_empty()).then_some(tools),
            tags: (!tags.is_empty()).then_some(tags),
            orientation: Some(self.orientation),
        }
    }

    /// What the image link will look like once stored
    pub fn preview_link(&self, normalizer: &LinkNormalizer) -> String {
        normalizer.normalize(self.image_link.trim())
    }

    /// Clear inputs after a successful upload
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
