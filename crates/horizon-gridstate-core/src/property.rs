//! Property system for Horizon GridState.
//!
//! A [`Property<T>`] wraps a value and detects changes: `set()` compares the
//! new value with the current one and reports whether anything actually
//! changed. The engines pair each property with a [`crate::Signal`] and emit
//! only when `set` reports a change, which is what keeps downstream
//! notification deduplicated.
//!
//! # Example
//!
//! ```
//! use horizon_gridstate_core::{Property, Signal};
//!
//! struct PageField {
//!     value: Property<u64>,
//!     changed: Signal<u64>,
//! }
//!
//! impl PageField {
//!     fn set(&self, page: u64) {
//!         if self.value.set(page) {
//!             self.changed.emit(page);
//!         }
//!     }
//! }
//! ```

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// Uses interior mutability (`RwLock`) so engines can mutate state behind a
/// shared reference; `Property<T>` is `Send + Sync` when `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, prefer [`with`](Self::with).
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    ///
    /// Useful during initialization where notification is deferred anyway.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// If the new value compares equal to the current one, the value is not
    /// updated and `false` is returned. The caller should emit the
    /// associated notification signal only when this returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);

        assert!(prop.set(100));
        assert_eq!(prop.get(), 100);
    }

    #[test]
    fn test_set_same_value_reports_no_change() {
        let prop = Property::new(42);
        assert!(!prop.set(42));
        assert_eq!(prop.get(), 42);
    }

    #[test]
    fn test_replace_returns_old_value() {
        let prop = Property::new("a".to_string());
        assert_eq!(prop.replace("b".to_string()), Some("a".to_string()));
        assert_eq!(prop.replace("b".to_string()), None);
        assert_eq!(prop.get(), "b");
    }

    #[test]
    fn test_with_borrows_without_clone() {
        let prop = Property::new(vec![1, 2, 3]);
        let len = prop.with(|v| v.len());
        assert_eq!(len, 3);
    }

    #[test]
    fn test_set_silent() {
        let prop = Property::new(1);
        prop.set_silent(2);
        assert_eq!(prop.get(), 2);
    }
}
