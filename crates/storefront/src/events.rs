//! State-change events and user-facing notifications.
//!
//! Services publish here after every mutation instead of touching any
//! presentation code. Renderers subscribe and redraw from the event payloads
//! or by re-reading state.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use crate::cart::CartSummary;

/// Default channel capacity. Slow subscribers skip older events.
const DEFAULT_CAPACITY: usize = 64;

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A short message for the shopper (the storefront's toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationLevel::Success)
    }

    #[must_use]
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationLevel::Warning)
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationLevel::Error)
    }

    fn new(title: impl Into<String>, message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level,
        }
    }
}

/// Something observable changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The cart's contents changed.
    CartUpdated { summary: CartSummary },
    /// The shopper signed in or out.
    SessionChanged { display_name: Option<String> },
    /// The product grid's filter or page changed.
    ListingUpdated {
        visible: usize,
        total_matches: usize,
        has_more: bool,
    },
    /// A message to show the shopper.
    Notification(Notification),
}

/// Broadcast channel for [`StoreEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Start receiving events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) {
        if self.sender.send(event).is_err() {
            trace!("No event subscribers");
        }
    }

    /// Publish a notification.
    pub fn notify(&self, notification: Notification) {
        self.publish(StoreEvent::Notification(notification));
    }
}
