//! Signal/slot system for Horizon GridState.
//!
//! This module provides a type-safe signal/slot mechanism for change
//! notification between the list-state engines and their host view. Engines
//! emit signals when their state changes, and connected slots (callbacks)
//! are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Delivery Model
//!
//! Slots are always invoked synchronously, in connection order, on the
//! emitting thread, and the emission completes before `emit` returns. The
//! engines built on top of this are single-threaded cooperative state
//! machines, so there is no queued or cross-thread delivery. `Signal` is
//! still `Send + Sync` so engines can be shared behind an `Arc`.
//!
//! Slots are permitted to re-enter the signal system: a slot may connect,
//! disconnect, or even emit the signal it is currently being invoked from.
//! Connections added or removed during an emission take effect on the next
//! emission, not the current one.
//!
//! # Related Modules
//!
//! - [`crate::Property`] - Reactive values that typically emit signals on change
//! - [`crate::ViewScope`] - Per-view registry of signal-emitting engines
//!
//! # Example
//!
//! ```
//! use horizon_gridstate_core::Signal;
//!
//! let page_changed = Signal::<u64>::new();
//!
//! let conn_id = page_changed.connect(|page| {
//!     println!("now on page {page}");
//! });
//!
//! page_changed.emit(2);
//!
//! page_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// A type-safe signal with any number of connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a shared
/// reference to the provided arguments. Use `()` for signals with no
/// arguments, or a tuple for multiple arguments.
///
/// # Re-entrancy
///
/// The connection list is snapshotted at the start of each emission and the
/// internal lock is released before any slot runs, so slots may safely call
/// back into this signal (including emitting it again). A slot that panics
/// propagates the panic to the emitter; nothing is caught or suppressed.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Arc<dyn Fn(&Args) + Send + Sync>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_gridstate_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("got: {s}"));
    /// signal.emit("hello".to_string());
    /// signal.disconnect(id);
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// # Safety contract
    ///
    /// The returned guard holds a raw pointer to this signal. The signal must
    /// outlive the guard. Keeping the signal's owner in an `Arc` alongside
    /// the guard is the usual way to satisfy this.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: self as *const Signal<Args>,
            id,
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
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
    /// While blocked, calls to `emit()` do nothing. Used during batch
    /// updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// Does nothing if the signal is blocked. The slot list is snapshotted
    /// and the lock released before any slot runs, so slots may re-enter
    /// this signal.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "gridstate::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot under the lock; invoke outside it so slots can re-enter.
        let slots: Vec<_> = self.connections.lock().values().cloned().collect();
        tracing::trace!(
            target: "gridstate::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<u64>: Send, Sync);

/// RAII guard for a signal connection.
///
/// Dropping the guard disconnects the slot. Obtained from
/// [`Signal::connect_scoped`].
pub struct ConnectionGuard<Args> {
    signal: *const Signal<Args>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        // SAFETY: the connect_scoped contract requires the signal to outlive
        // the guard; the pointer is only dereferenced here.
        unsafe {
            if !self.signal.is_null() {
                let _ = (*self.signal).disconnect(self.id);
            }
        }
    }
}

// SAFETY: the raw pointer is only dereferenced in drop(), Signal<Args> is
// itself Send + Sync, and the connect_scoped contract requires the signal to
// outlive the guard.
unsafe impl<Args> Send for ConnectionGuard<Args> {}
unsafe impl<Args> Sync for ConnectionGuard<Args> {}
