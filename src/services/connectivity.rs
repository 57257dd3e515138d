//! Connectivity monitor service.
//!
//! Tracks a single "connected" flag, updated by the platform shell's
//! reachability facility, and wakes subscribers on transitions only.
//! Event-driven throughout; nothing polls.

use tokio::sync::watch;

/// Shared reachability state.
///
/// The embedding shell creates one monitor per process, pushes transitions
/// into it with [`set_connected`](Self::set_connected), and hands an `Arc`
/// of it to every consumer.
pub struct ConnectivityMonitor {
    sender: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    /// Create a monitor with the given initial status.
    pub fn new(initially_connected: bool) -> Self {
        let (sender, _) = watch::channel(initially_connected);
        Self { sender }
    }

    /// Record a reachability update. Subscribers wake only when the status
    /// actually changes; duplicate reports are dropped.
    pub fn set_connected(&self, connected: bool) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == connected {
                false
            } else {
                *current = connected;
                true
            }
        });
        if changed {
            tracing::info!(connected, "connectivity changed");
        }
    }

    /// Current reachability status.
    pub fn is_connected(&self) -> bool {
        *self.sender.borrow()
    }

    /// A receiver that wakes on every status transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}
