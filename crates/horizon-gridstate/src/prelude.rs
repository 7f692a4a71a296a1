//! Prelude module for Horizon GridState.
//!
//! Re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use horizon_gridstate::prelude::*;
//! ```

pub use crate::state::{
    ExpansionModel, ITEMS_PER_PAGE_ALL, OptionsSnapshot, OptionsWatcher, PageInput, Pagination,
    PaginationOptions, SortItem, SortOrder, TableState,
};

pub use horizon_gridstate_core::{GridStateError, Property, Signal, ViewScope};
