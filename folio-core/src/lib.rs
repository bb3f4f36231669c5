//! Folio - portfolio catalog, image links and site assistant

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod link;
pub mod profile;
pub mod project;
pub mod store;
