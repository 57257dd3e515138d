//! # View Models Module
//!
//! The orchestration core: business logic coordinating the catalog client,
//! the cache store, and the connectivity monitor into one observable state.

pub mod catalog_view_model;

pub use catalog_view_model::{CatalogState, CatalogViewModel};
