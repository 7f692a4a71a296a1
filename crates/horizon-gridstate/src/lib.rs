//! Headless list-state engines for table and grid views.
//!
//! Horizon GridState provides the state-derivation layer under a data table:
//! pagination, query-option aggregation, and row-expansion tracking, built
//! on the signal/property system from `horizon-gridstate-core`. There is no
//! rendering, network, or persistence in here — the host view owns the item
//! data and reacts to change notifications.
//!
//! # Quick Start
//!
//! ```
//! use horizon_gridstate::prelude::*;
//!
//! let table: TableState<String> = TableState::builder()
//!     .items_per_page(25)
//!     .sort_by(vec![SortItem::ascending("name")])
//!     .build(|snapshot| {
//!         // One call per distinct settled query: refetch or re-derive rows.
//!         println!("page {} of the current query", snapshot.page);
//!     });
//!
//! // Data arrives from the host as it loads.
//! table.set_items_length(95);
//!
//! let pagination = table.pagination();
//! assert_eq!(pagination.page_count(), 4); // ceil(95 / 25)
//! pagination.set_page(10); // clamps to the last page
//! assert_eq!(pagination.page(), 4);
//! assert_eq!(pagination.start_index(), 75);
//! assert_eq!(pagination.stop_index(), 95);
//! ```

pub mod prelude;
pub mod state;

pub use horizon_gridstate_core::{
    ConnectionGuard, ConnectionId, GridStateError, Property, Result, Signal, ViewScope,
};
pub use state::{
    ExpansionKey, ExpansionModel, ITEMS_PER_PAGE_ALL, OptionsSnapshot, OptionsWatcher, PageInput,
    Pagination, PaginationOptions, SortItem, SortOrder, TableState, TableStateBuilder,
};
