//! Signal/slot system for Tabula.
//!
//! A [`Signal<Args>`] holds any number of connected slots (closures). When the
//! signal is emitted every slot is invoked, directly and in the emitting
//! thread, with a reference to the arguments.
//!
//! Coordinators use signals to publish model events (rows updated, a section
//! needing a wholesale reload, a diff batch being ready) to any number of
//! view-side listeners.
//!
//! # Example
//!
//! ```
//! use tabula_core::Signal;
//!
//! let rows_updated = Signal::<usize>::new();
//!
//! let conn_id = rows_updated.connect(|section| {
//!     println!("section {} changed", section);
//! });
//!
//! rows_updated.emit(0);
//! rows_updated.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::{span_names, targets};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple for multiple arguments.
///
/// # Re-entrancy
///
/// Slots are collected before they are invoked, so a slot may connect or
/// disconnect slots on the same signal without deadlocking. Changes made
/// during an emission take effect from the next emission.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// Returns the number of slots invoked (0 if the signal is blocked).
    pub fn emit(&self, args: Args) -> usize {
        let _span = tracing::trace_span!(target: targets::SIGNAL, span_names::SIGNAL).entered();
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return 0;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<(usize, bool)>: Send, Sync);
