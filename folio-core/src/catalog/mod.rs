//! Portfolio catalog - merged project listing and admin uploads
//!
//! # Overview
//!
//! The catalog shown on the site is the concatenation of:
//! - Projects uploaded through the admin form, newest first
//! - The curated projects compiled into the site, in declaration order
//!
//! # Architecture
//!
//! ```text
//! SubmissionForm ──validate/to_details──▶ CatalogService::submit
//!                                               │ normalize link, sanitize
//!                                               ▼
//!                                         DocumentStore (projects)
//!                                               │
//! CatalogView ◀── CatalogListing ◀── CatalogService::list_all
//!   (filter, show more, detail)          (remote ++ static)
//! ```
//!
//! Reads never fail outright: a store failure degrades to the static
//! entries. Writes surface a classified [`SubmitError`].

mod form;
mod service;
mod static_entries;
mod view;

pub use form::{split_list, FormError, SubmissionForm, FORM_INCOMPLETE_MESSAGE};
pub use service::{
    sanitize, CatalogListing, CatalogService, SubmitError, CREATED_AT_FIELD, DEFAULT_COLLECTION,
};
pub use static_entries::static_projects;
pub use view::{
    categories, filter_by_category, CatalogView, CategoryFilter, ALL_CATEGORIES, INITIAL_LIMIT,
};
