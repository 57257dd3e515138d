//! Events emitted when catalog state changes.

use crate::error::CatalogError;

/// Notifications published by the view-model as its observable state moves.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// The item sequence was replaced or extended.
    ListUpdated { count: usize },

    /// A list load started or finished. `refresh` distinguishes a full
    /// refresh from an incremental load-more.
    LoadingChanged { refresh: bool, active: bool },

    /// A list load failed; the error is also stored on the state.
    LoadFailed { error: CatalogError },

    /// The favorites set changed.
    FavoritesChanged { count: usize },

    /// A detail record was fetched from the network and cached.
    DetailFetched { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failed_should_carry_the_error() {
        let event = CatalogEvent::LoadFailed {
            error: CatalogError::ServerError(503),
        };
        match event {
            CatalogEvent::LoadFailed { error } => {
                assert_eq!(error, CatalogError::ServerError(503));
            }
            _ => panic!("Expected LoadFailed event"),
        }
    }

    #[test]
    fn loading_changed_should_distinguish_refresh_from_load_more() {
        let refresh = CatalogEvent::LoadingChanged {
            refresh: true,
            active: true,
        };
        let more = CatalogEvent::LoadingChanged {
            refresh: false,
            active: true,
        };
        assert_ne!(refresh, more);
    }
}
