//! Guards for simulated asynchronous operations.
//!
//! Loading more products, checking out and signing in all wait out an
//! artificial delay before they take effect. Each one first takes a
//! [`Ticket`] for its [`OperationKind`]:
//!
//! - `load-more` and `checkout` reject a second request while one is in
//!   flight, so repeated clicks cannot double-fire.
//! - `sign-in` lets the newest request win. An older attempt that wakes up
//!   after a newer one started finds its ticket stale and gives up.
//!
//! Dropping a ticket (for example when the waiting request is cancelled)
//! releases its kind. An action that makes a pending request meaningless
//! (signing out, changing the filter) calls [`PendingOperations::invalidate`]
//! so the request completes as superseded.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

/// A kind of simulated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    LoadMore,
    Checkout,
    SignIn,
}

/// What happens when a second request arrives while one is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    Reject,
    Supersede,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadMore => "load-more",
            Self::Checkout => "checkout",
            Self::SignIn => "sign-in",
        }
    }

    const fn overlap(self) -> Overlap {
        match self {
            Self::LoadMore | Self::Checkout => Overlap::Reject,
            Self::SignIn => Overlap::Supersede,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a simulated operation did not take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Another request of the same kind is still running.
    #[error("{0} already in progress")]
    Pending(OperationKind),

    /// A newer request of the same kind replaced this one.
    #[error("{0} was superseded by a newer request")]
    Superseded(OperationKind),
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    in_flight: bool,
}

/// Registry of in-flight simulated operations, keyed by kind.
///
/// Cheaply cloneable; clones share state.
#[derive(Debug, Clone, Default)]
pub struct PendingOperations {
    slots: Arc<Mutex<HashMap<OperationKind, Slot>>>,
}

impl PendingOperations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<OperationKind, Slot>> {
        // Slot updates are single assignments, so a poisoned map is still consistent.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start an operation of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Pending` if `kind` rejects overlap and a
    /// request of that kind is already in flight.
    pub fn begin(&self, kind: OperationKind) -> Result<Ticket, OperationError> {
        let mut slots = self.slots();
        let slot = slots.entry(kind).or_default();

        if slot.in_flight && kind.overlap() == Overlap::Reject {
            debug!(operation = %kind, "Rejected overlapping request");
            return Err(OperationError::Pending(kind));
        }

        if slot.in_flight {
            debug!(operation = %kind, "Superseding pending request");
        }

        slot.generation += 1;
        slot.in_flight = true;

        Ok(Ticket {
            operations: self.clone(),
            kind,
            generation: slot.generation,
            released: false,
        })
    }

    /// Whether a request of `kind` is in flight.
    #[must_use]
    pub fn is_pending(&self, kind: OperationKind) -> bool {
        self.slots().get(&kind).is_some_and(|slot| slot.in_flight)
    }

    /// Make any in-flight request of `kind` stale without starting a new
    /// one. Returns whether a request was in flight.
    pub fn invalidate(&self, kind: OperationKind) -> bool {
        let mut slots = self.slots();
        let slot = slots.entry(kind).or_default();
        let was_pending = slot.in_flight;
        slot.generation += 1;
        slot.in_flight = false;
        if was_pending {
            debug!(operation = %kind, "Invalidated pending request");
        }
        was_pending
    }

    /// Clear the in-flight flag if `generation` is still the latest.
    /// Returns whether it was.
    fn release(&self, kind: OperationKind, generation: u64) -> bool {
        let mut slots = self.slots();
        match slots.get_mut(&kind) {
            Some(slot) if slot.generation == generation => {
                slot.in_flight = false;
                true
            }
            _ => false,
        }
    }
}

/// Proof that an operation was started. See the module docs.
#[derive(Debug)]
#[must_use = "dropping a ticket releases the operation immediately"]
pub struct Ticket {
    operations: PendingOperations,
    kind: OperationKind,
    generation: u64,
    released: bool,
}

impl Ticket {
    /// The operation kind this ticket belongs to.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Whether no newer operation of this kind has started.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.operations
            .slots()
            .get(&self.kind)
            .is_some_and(|slot| slot.generation == self.generation)
    }

    /// Finish the operation. Call this after the delay and before mutating.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Superseded` if a newer request of the same
    /// kind started while this one was waiting; the caller must then leave
    /// state untouched.
    pub fn complete(mut self) -> Result<(), OperationError> {
        self.released = true;
        if self.operations.release(self.kind, self.generation) {
            Ok(())
        } else {
            debug!(operation = %self.kind, "Dropping superseded request");
            Err(OperationError::Superseded(self.kind))
        }
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        if !self.released {
            self.operations.release(self.kind, self.generation);
        }
    }
}
