//! CLI command implementations.

pub mod cart;
pub mod products;
pub mod session;

use tokio::sync::broadcast::Receiver;
use tracing::{info, warn};

use techstore_storefront::events::{NotificationLevel, StoreEvent};
use techstore_storefront::state::AppState;

/// Collects the notifications a command raised so they can be shown after
/// its own output.
pub struct NotificationLog {
    events: Receiver<StoreEvent>,
}

impl NotificationLog {
    pub fn subscribe(state: &AppState) -> Self {
        Self {
            events: state.events().subscribe(),
        }
    }

    /// Log every notification received so far.
    pub fn flush(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let StoreEvent::Notification(n) = event else {
                continue;
            };
            match n.level {
                NotificationLevel::Success => info!("{}: {}", n.title, n.message),
                NotificationLevel::Warning | NotificationLevel::Error => {
                    warn!("{}: {}", n.title, n.message);
                }
            }
        }
    }
}
