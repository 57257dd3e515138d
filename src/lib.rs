//! # Kantodex - Offline-First Catalog Client Core
//!
//! The data-orchestration core of a Pokémon catalog browser: paginated
//! fetching, two-tier (network → cache) resolution, favorites persistence,
//! and connectivity-aware reloading. UI shells consume this crate and render
//! whatever state it exposes.
//!
//! ## Architecture
//!
//! This crate follows the Model-View-ViewModel (MVVM) pattern, with the view
//! supplied externally by the embedding shell:
//!
//! ```text
//! ┌─────────────┐    Events     ┌───────────────────┐   Updates  ┌─────────┐
//! │  UI Shell   │◄──────────────│ CatalogViewModel  │◄───────────│ Models  │
//! │  (external) │               │                   │            │         │
//! │ - Rendering │   Operations  │ - Pagination      │            │ - Items │
//! │ - Input     │──────────────►│ - Cache vs network│            │ - State │
//! └─────────────┘               │ - Favorites       │            └─────────┘
//!                               └───────────────────┘
//!                                        ▲
//!                                        │
//!                  ┌─────────────────────┼─────────────────────┐
//!                  ▼                     ▼                     ▼
//!           ┌────────────┐       ┌────────────┐       ┌──────────────┐
//!           │ CatalogApi │       │ CacheStore │       │ Connectivity │
//!           │ (reqwest)  │       │ (JSON kv)  │       │ (watch chan) │
//!           └────────────┘       └────────────┘       └──────────────┘
//! ```
//!
//! Services are injected as trait objects, so every collaborator can be
//! replaced with a test double (see [`testing`]).

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod testing;
pub mod view_models;

// Re-export main types for easy access
pub use config::Config;
pub use error::CatalogError;
pub use events::{CatalogEvent, CatalogEventHandler, EventBus, SimpleEventBus};
pub use models::{Favorites, ItemDetail, ListItem, Page};
pub use services::{
    CacheStore, CatalogApi, CatalogClient, ConnectivityMonitor, FileCacheStore, MemoryCacheStore,
};
pub use view_models::{CatalogState, CatalogViewModel};
