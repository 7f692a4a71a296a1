//! Core systems for Horizon GridState.
//!
//! This crate provides the foundational components of the GridState list-state
//! engines:
//!
//! - **Signal/Slot System**: Type-safe change notification between engines
//!   and their host view
//! - **Property System**: Reactive values with change detection
//! - **View Scope**: Explicit per-view provisioning of shared engine state
//! - **Errors**: The (deliberately small) failure surface of the system
//!
//! # Signal/Property Example
//!
//! ```
//! use horizon_gridstate_core::{Property, Signal};
//!
//! // A reactive counter with change notification
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn new() -> Self {
//!         Self {
//!             value: Property::new(0),
//!             value_changed: Signal::new(),
//!         }
//!     }
//!
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//!
//! let counter = Counter::new();
//! counter.value_changed.connect(|value| println!("now {value}"));
//! counter.increment();
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod scope;
pub mod signal;

pub use error::{GridStateError, Result};
pub use property::Property;
pub use scope::ViewScope;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
