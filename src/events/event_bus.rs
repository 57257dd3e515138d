//! # Event Bus
//!
//! Central event distribution for decoupled communication between the
//! view-model and its observers using the observer pattern.

use super::catalog_events::CatalogEvent;

/// Type alias for event handlers to reduce complexity
pub type CatalogEventHandler = Box<dyn Fn(&CatalogEvent) + Send + Sync>;

/// Event bus for decoupled communication between components
pub trait EventBus: Send + Sync {
    /// Publish an event to every subscriber
    fn publish(&self, event: CatalogEvent);

    /// Subscribe to events
    fn subscribe(&mut self, handler: CatalogEventHandler);
}

/// Simple in-memory event bus implementation
pub struct SimpleEventBus {
    handlers: Vec<CatalogEventHandler>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl Default for SimpleEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for SimpleEventBus {
    fn publish(&self, event: CatalogEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }

    fn subscribe(&mut self, handler: CatalogEventHandler) {
        self.handlers.push(handler);
    }
}
