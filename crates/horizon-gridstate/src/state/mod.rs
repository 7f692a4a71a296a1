//! List-state engines for table and grid views.
//!
//! Three independent, composable pieces of list-processing state, combined
//! per view by [`TableState`]:
//!
//! - [`Pagination`]: derives the visible window (start/stop index, page
//!   count) from an item count and navigates it with clamping semantics
//! - [`OptionsWatcher`]: merges pagination, sort, group, and search state
//!   into one [`OptionsSnapshot`] and notifies a consumer only on
//!   meaningful change
//! - [`ExpansionModel`]: tracks which rows have their detail panel open,
//!   keyed by item identity
//!
//! The host view owns the raw item data and feeds counts and identities in;
//! the engines are pure state derivation with signal-based invalidation and
//! no I/O of their own.
//!
//! ```text
//! ┌────────────┐  items_length   ┌──────────────┐
//! │ host view  │───────────────> │  Pagination  │──┐ page / size
//! │ (owns the  │                 └──────────────┘  │  signals
//! │ item data) │  sort / group / search            v
//! │            │───────────────> ┌────────────────────┐
//! │            │ <───────────────│   OptionsWatcher   │
//! └────────────┘  on_change      └────────────────────┘
//!       │ item ids               ┌────────────────┐
//!       └──────────────────────> │ ExpansionModel │
//!                <───────────────└────────────────┘
//!                expanded_changed
//! ```

mod expansion;
mod options;
mod pagination;
mod table;

pub use expansion::{ExpansionKey, ExpansionModel};
pub use options::{OptionsSnapshot, OptionsWatcher, SortItem, SortOrder};
pub use pagination::{
    ITEMS_PER_PAGE_ALL, PageInput, Pagination, PaginationOptions,
};
pub use table::{TableState, TableStateBuilder};
