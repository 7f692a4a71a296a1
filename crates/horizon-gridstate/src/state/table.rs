//! Per-view wiring of the list-state engines.
//!
//! [`TableState`] is the face a table or grid view holds onto: one
//! [`Pagination`], one [`ExpansionModel`], and one [`OptionsWatcher`],
//! created together and registered in a [`ViewScope`] so collaborators
//! (header cells, footers, detail rows) can consume them by type. Engines
//! are per-view and never shared across unrelated views.
//!
//! # Example
//!
//! ```
//! use horizon_gridstate::state::TableState;
//!
//! let table: TableState<String> = TableState::builder()
//!     .page("2")
//!     .items_per_page(25)
//!     .expanded(["row-7".to_string()])
//!     .build(|snapshot| {
//!         // refetch rows for the new query
//!         let _ = snapshot;
//!     });
//!
//! table.set_items_length(120);
//! assert_eq!(table.pagination().page(), 2);
//! assert!(table.expansion().is_expanded(&"row-7".to_string()));
//! ```

use std::sync::Arc;

use horizon_gridstate_core::ViewScope;

use super::expansion::{ExpansionKey, ExpansionModel};
use super::options::{OptionsSnapshot, OptionsWatcher, SortItem};
use super::pagination::{PageInput, Pagination, PaginationOptions};

/// Builder for [`TableState`].
///
/// Carries the initial inputs a host typically restores from persisted view
/// settings. Obtained from [`TableState::builder`].
pub struct TableStateBuilder<K: ExpansionKey> {
    pagination: PaginationOptions,
    sort_by: Vec<SortItem>,
    group_by: Vec<SortItem>,
    search: Option<String>,
    expanded: Vec<K>,
}

impl<K: ExpansionKey> Default for TableStateBuilder<K> {
    fn default() -> Self {
        Self {
            pagination: PaginationOptions::default(),
            sort_by: Vec::new(),
            group_by: Vec::new(),
            search: None,
            expanded: Vec::new(),
        }
    }
}

impl<K: ExpansionKey> TableStateBuilder<K> {
    /// Initial 1-based page (integer or numeric string).
    pub fn page(mut self, page: impl Into<PageInput>) -> Self {
        self.pagination.page = page.into();
        self
    }

    /// Initial page size (integer or numeric string).
    pub fn items_per_page(mut self, items_per_page: impl Into<PageInput>) -> Self {
        self.pagination.items_per_page = items_per_page.into();
        self
    }

    /// Initial sort orderings.
    pub fn sort_by(mut self, sort_by: Vec<SortItem>) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Initial group orderings.
    pub fn group_by(mut self, group_by: Vec<SortItem>) -> Self {
        self.group_by = group_by;
        self
    }

    /// Initial search term.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Initially expanded row keys.
    pub fn expanded(mut self, expanded: impl IntoIterator<Item = K>) -> Self {
        self.expanded = expanded.into_iter().collect();
        self
    }

    /// Create the engines, wire the watcher, and register everything in a
    /// fresh [`ViewScope`].
    ///
    /// `on_change` receives the baseline snapshot before this returns and
    /// one notification per distinct settled snapshot afterwards.
    pub fn build<F>(self, on_change: F) -> TableState<K>
    where
        F: Fn(&OptionsSnapshot) + Send + Sync + 'static,
    {
        let pagination = Arc::new(Pagination::new(self.pagination));
        let expansion = Arc::new(ExpansionModel::with_expanded(self.expanded));
        let options = OptionsWatcher::observe(
            pagination.clone(),
            self.sort_by,
            self.group_by,
            self.search,
            on_change,
        );

        let scope = Arc::new(ViewScope::new());
        // A fresh scope cannot already hold these types.
        scope
            .provide(pagination.clone())
            .expect("fresh scope provides pagination once");
        scope
            .provide(expansion.clone())
            .expect("fresh scope provides expansion once");
        scope
            .provide(options.clone())
            .expect("fresh scope provides options once");

        TableState {
            scope,
            pagination,
            expansion,
            options,
        }
    }
}

/// The list-owner's handle on all per-view list state.
pub struct TableState<K: ExpansionKey> {
    scope: Arc<ViewScope>,
    pagination: Arc<Pagination>,
    expansion: Arc<ExpansionModel<K>>,
    options: Arc<OptionsWatcher>,
}

impl<K: ExpansionKey> TableState<K> {
    /// Start building a table state.
    pub fn builder() -> TableStateBuilder<K> {
        TableStateBuilder::default()
    }

    /// The pagination engine.
    pub fn pagination(&self) -> &Arc<Pagination> {
        &self.pagination
    }

    /// The expansion model.
    pub fn expansion(&self) -> &Arc<ExpansionModel<K>> {
        &self.expansion
    }

    /// The options watcher.
    pub fn options(&self) -> &Arc<OptionsWatcher> {
        &self.options
    }

    /// The view scope holding the engines, for collaborator consumption.
    pub fn scope(&self) -> &Arc<ViewScope> {
        &self.scope
    }

    /// Feed the current total item count through to pagination.
    pub fn set_items_length(&self, items_length: u64) {
        self.pagination.set_items_length(items_length);
    }

    /// Current settled query snapshot.
    pub fn snapshot(&self) -> OptionsSnapshot {
        self.options.snapshot()
    }
}

impl<K: ExpansionKey> std::fmt::Debug for TableState<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableState")
            .field("pagination", &self.pagination)
            .field("expanded_count", &self.expansion.expanded_count())
            .finish()
    }
}
