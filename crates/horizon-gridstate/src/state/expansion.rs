//! Expansion state for item views.
//!
//! [`ExpansionModel`] tracks which rows of a list have their detail panel
//! open. Membership is keyed by item *identity*, not index: reordering the
//! list leaves expansion intact, and a removed item simply stops matching.
//!
//! The model keeps two representations in lockstep: a hash set for O(1)
//! membership tests, and an insertion-ordered sequence published outward
//! through [`ExpansionModel::expanded_changed`] so the host can persist or
//! serialize the open rows. Mutations rebuild the backing set rather than
//! aliasing it, so a published sequence never changes under an observer.
//!
//! # Example
//!
//! ```
//! use horizon_gridstate::state::ExpansionModel;
//!
//! let expansion = ExpansionModel::new();
//! expansion.expanded_changed.connect(|open: &Vec<String>| {
//!     println!("open rows: {open:?}");
//! });
//!
//! expansion.expand("A".to_string(), true);
//! expansion.expand("B".to_string(), true);
//! assert!(expansion.is_expanded(&"A".to_string()));
//! assert_eq!(expansion.expanded(), vec!["A".to_string(), "B".to_string()]);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use parking_lot::RwLock;

use horizon_gridstate_core::Signal;

/// Identity type of an expandable item.
///
/// Blanket-implemented; hosts use whatever unique row identifier they
/// already have (string keys, integer ids, ...).
pub trait ExpansionKey: Clone + Eq + Hash + Send + Sync + 'static {}

impl<K: Clone + Eq + Hash + Send + Sync + 'static> ExpansionKey for K {}

struct ExpandedEntries<K> {
    /// Fast membership. Rebuilt (not mutated in place) on every change.
    members: HashSet<K>,
    /// Insertion order, for the outward-published sequence.
    order: Vec<K>,
}

/// Set-backed membership model of expanded (detail-open) rows.
pub struct ExpansionModel<K: ExpansionKey> {
    entries: RwLock<ExpandedEntries<K>>,
    /// Emitted with the full insertion-ordered sequence after every
    /// effective mutation. No-op mutations (expanding an already-expanded
    /// key) do not emit.
    pub expanded_changed: Signal<Vec<K>>,
}

impl<K: ExpansionKey> ExpansionModel<K> {
    /// Create a model with nothing expanded.
    pub fn new() -> Self {
        Self::with_expanded(std::iter::empty())
    }

    /// Create a model from a host-supplied initial sequence.
    ///
    /// Duplicate keys keep their first occurrence.
    pub fn with_expanded(initial: impl IntoIterator<Item = K>) -> Self {
        let mut members = HashSet::new();
        let mut order = Vec::new();
        for key in initial {
            if members.insert(key.clone()) {
                order.push(key);
            }
        }
        Self {
            entries: RwLock::new(ExpandedEntries { members, order }),
            expanded_changed: Signal::new(),
        }
    }

    /// Whether the given item is expanded.
    pub fn is_expanded(&self, key: &K) -> bool {
        self.entries.read().members.contains(key)
    }

    /// Expand or collapse an item.
    ///
    /// Does nothing (and emits nothing) when the item is already in the
    /// requested state.
    pub fn expand(&self, key: K, expand: bool) {
        let published = {
            let mut entries = self.entries.write();
            if entries.members.contains(&key) == expand {
                return;
            }

            let mut members = entries.members.clone();
            if expand {
                members.insert(key.clone());
                entries.order.push(key);
            } else {
                members.remove(&key);
                entries.order.retain(|existing| existing != &key);
            }
            entries.members = members;
            entries.order.clone()
        };

        tracing::debug!(
            target: "gridstate::expansion",
            expanded_count = published.len(),
            expanded = expand,
            "expansion changed"
        );
        self.expanded_changed.emit(published);
    }

    /// Flip an item's expansion state.
    pub fn toggle_expand(&self, key: K) {
        let expand = !self.is_expanded(&key);
        self.expand(key, expand);
    }

    /// The expanded keys in insertion order.
    pub fn expanded(&self) -> Vec<K> {
        self.entries.read().order.clone()
    }

    /// Number of expanded items.
    pub fn expanded_count(&self) -> usize {
        self.entries.read().order.len()
    }

    /// Replace the whole expansion state from a host-supplied sequence.
    ///
    /// Used to sync back in when the host owns the persisted list of open
    /// rows. Duplicates keep their first occurrence; emits only when the
    /// resulting sequence differs from the current one.
    pub fn set_expanded(&self, keys: impl IntoIterator<Item = K>) {
        let mut members = HashSet::new();
        let mut order = Vec::new();
        for key in keys {
            if members.insert(key.clone()) {
                order.push(key);
            }
        }

        let published = {
            let mut entries = self.entries.write();
            if entries.order == order {
                return;
            }
            entries.members = members;
            entries.order = order.clone();
            order
        };

        self.expanded_changed.emit(published);
    }
}

impl<K: ExpansionKey> Default for ExpansionModel<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ExpansionKey + std::fmt::Debug> std::fmt::Debug for ExpansionModel<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpansionModel")
            .field("expanded", &self.entries.read().order)
            .finish()
    }
}

static_assertions::assert_impl_all!(ExpansionModel<String>: Send, Sync);
