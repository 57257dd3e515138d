//! # Events Module
//!
//! Explicit state-change notifications: the view-model publishes
//! [`CatalogEvent`]s through an [`EventBus`], and shells subscribe handlers
//! to re-render on change. No UI framework involved.

pub mod catalog_events;
pub mod event_bus;

pub use catalog_events::CatalogEvent;
pub use event_bus::{CatalogEventHandler, EventBus, SimpleEventBus};
