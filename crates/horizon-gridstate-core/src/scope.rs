//! Per-view provisioning scope.
//!
//! A [`ViewScope`] is the explicit replacement for dependency-injection
//! lookups: the list view that owns the engines provides them into its scope
//! once, and collaborators consume them by type. Consuming a context that
//! was never provided is a wiring bug and fails loudly with
//! [`GridStateError::MissingContext`] rather than silently defaulting.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_gridstate_core::ViewScope;
//!
//! struct Counter(u32);
//!
//! let scope = ViewScope::new();
//! scope.provide(Arc::new(Counter(7))).unwrap();
//!
//! let counter = scope.consume::<Counter>().unwrap();
//! assert_eq!(counter.0, 7);
//!
//! // A type never provided is an error, not a default.
//! assert!(scope.consume::<String>().is_err());
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{GridStateError, Result};

/// A typed registry of per-view shared state.
///
/// Each list view owns one scope; each engine type may be provided at most
/// once. Entries are `Arc`-shared and looked up by `TypeId`.
#[derive(Default)]
pub struct ViewScope {
    entries: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ViewScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide a shared value into this scope.
    ///
    /// Returns [`GridStateError::ContextAlreadyProvided`] if a value of the
    /// same type is already present.
    pub fn provide<T: Any + Send + Sync>(&self, value: Arc<T>) -> Result<()> {
        let mut entries = self.entries.write();
        match entries.entry(TypeId::of::<T>()) {
            std::collections::hash_map::Entry::Occupied(_) => {
                Err(GridStateError::ContextAlreadyProvided {
                    context: type_name::<T>(),
                })
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                tracing::debug!(target: "gridstate::scope", context = type_name::<T>(), "context provided");
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Consume a shared value from this scope.
    ///
    /// Returns [`GridStateError::MissingContext`] if no value of the
    /// requested type was provided.
    pub fn consume<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.entries
            .read()
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|entry| entry.downcast::<T>().ok())
            .ok_or(GridStateError::MissingContext {
                context: type_name::<T>(),
            })
    }

    /// Whether a value of type `T` has been provided.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }
}

impl std::fmt::Debug for ViewScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewScope")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(ViewScope: Send, Sync);
