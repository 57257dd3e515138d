//! # Models Module
//!
//! Data records for the catalog domain: wire shapes as the remote API sends
//! them, the domain records the rest of the crate works with, and the
//! favorites set.

pub mod catalog;
pub mod favorites;

pub use catalog::{ItemDetail, ListItem, Page};
pub use favorites::Favorites;
