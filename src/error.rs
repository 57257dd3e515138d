//! Error types for catalog operations.
//!
//! The taxonomy is closed: every failure a shell can observe is one of these
//! variants, and each carries the user-facing description shells display in
//! a retry prompt. Cache failures never surface here; the cache layer
//! swallows them (see `services::cache`).

use thiserror::Error;

/// Errors produced by catalog fetches and surfaced through the view-model.
///
/// `Clone` so a single in-flight result can be handed to every caller that
/// was deduplicated onto it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A request URL could not be constructed or parsed.
    #[error("Invalid URL")]
    BadUrl,

    /// The server reply could not be read as a response at all.
    #[error("Bad response from server")]
    BadResponse,

    /// The response body was not valid JSON for the expected shape.
    #[error("Failed to decode data")]
    DecodingError,

    /// The server answered with a non-2xx status.
    #[error("Server error: {0}")]
    ServerError(u16),

    /// The device is offline and no cached data could satisfy the request.
    #[error("No internet connection")]
    NoInternetConnection,

    /// Any other transport failure.
    #[error("An unknown error occurred")]
    Unknown,
}
