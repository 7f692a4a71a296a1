//! Query-option aggregation for list views.
//!
//! A table view's effective query is spread across several pieces of state:
//! the pagination engine (page, page size), the sort and group orderings,
//! and the free-text search. [`OptionsWatcher`] folds all of them into one
//! immutable [`OptionsSnapshot`] and notifies its consumer exactly once per
//! *distinct* settled snapshot — the consumer typically reacts by refetching
//! or re-deriving the visible rows, so spurious notifications are spurious
//! work.
//!
//! Two rules shape the emissions:
//!
//! - **Dedup**: a candidate snapshot structurally equal to the last emitted
//!   one is dropped silently. Equality is order-sensitive over `sort_by` /
//!   `group_by` since array order encodes sort precedence.
//! - **Search resets the page**: when the search term changes, the page is
//!   forced back to 1 *before* the snapshot is emitted, so the consumer
//!   lands on the first page of the new result set. The nested page
//!   notification this triggers is folded into the same settle pass; only
//!   the final snapshot (with `page == 1`) is emitted.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_gridstate::state::{OptionsWatcher, Pagination, SortItem};
//!
//! let pagination = Arc::new(Pagination::default());
//! pagination.set_items_length(50);
//!
//! let watcher = OptionsWatcher::observe(
//!     pagination.clone(),
//!     vec![SortItem::ascending("name")],
//!     Vec::new(),
//!     None,
//!     |snapshot| println!("refetch page {}", snapshot.page),
//! );
//!
//! pagination.next_page(); // notifies with page == 2
//! watcher.set_search(Some("acme".into())); // resets to page 1, notifies once
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use horizon_gridstate_core::{ConnectionId, Property};

use super::pagination::Pagination;

/// Direction of a sort or group ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// One column ordering within a sort or group sequence.
///
/// Sequence position encodes precedence: earlier items sort first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortItem {
    /// Column key this ordering applies to.
    pub key: String,
    /// Direction of the ordering.
    pub order: SortOrder,
}

impl SortItem {
    /// An ordering with an explicit direction.
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            key: key.into(),
            order,
        }
    }

    /// An ascending ordering on `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    /// A descending ordering on `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortOrder::Descending)
    }
}

/// Immutable record of all query-affecting state at one instant.
///
/// The derived `PartialEq` over owned fields is the deep structural
/// equality the dedup rule is defined in terms of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsSnapshot {
    /// Current 1-based page.
    pub page: u64,
    /// Current page size, or the all-items sentinel.
    pub items_per_page: i64,
    /// Sort orderings in precedence order.
    pub sort_by: Vec<SortItem>,
    /// Group orderings in precedence order.
    pub group_by: Vec<SortItem>,
    /// Free-text search term, if any.
    pub search: Option<String>,
}

/// Watches every query input and notifies a consumer on meaningful change.
///
/// Constructed with [`observe`](Self::observe), which emits the baseline
/// snapshot immediately. The watcher owns the sort/group/search inputs and
/// subscribes to the pagination engine's change signals; candidate snapshots
/// are built by *pulling* current values at notification time, so a
/// multi-field update (page size change resetting the page, say) is always
/// observed fully settled.
///
/// If the consumer callback panics, the panic propagates to whichever
/// mutation triggered the emission; nothing is caught here.
pub struct OptionsWatcher {
    pagination: Arc<Pagination>,
    sort_by: Property<Vec<SortItem>>,
    group_by: Property<Vec<SortItem>>,
    search: Property<Option<String>>,
    last_emitted: Mutex<Option<OptionsSnapshot>>,
    /// Set while a settle pass is in flight; nested notifications (the
    /// search-triggered page reset) are folded into the pass that set it.
    settling: AtomicBool,
    on_change: Box<dyn Fn(&OptionsSnapshot) + Send + Sync>,
    page_conn: ConnectionId,
    items_per_page_conn: ConnectionId,
}

impl OptionsWatcher {
    /// Start watching and emit the baseline snapshot.
    ///
    /// `sort_by`, `group_by`, and `search` seed the watcher-owned inputs;
    /// page state is read from (and subscribed on) `pagination`. The
    /// consumer is invoked once before this returns, establishing the
    /// baseline against which later candidates are compared.
    pub fn observe<F>(
        pagination: Arc<Pagination>,
        sort_by: Vec<SortItem>,
        group_by: Vec<SortItem>,
        search: Option<String>,
        on_change: F,
    ) -> Arc<Self>
    where
        F: Fn(&OptionsSnapshot) + Send + Sync + 'static,
    {
        let watcher = Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak_page = weak.clone();
            let page_conn = pagination.page_changed.connect(move |_| {
                if let Some(watcher) = weak_page.upgrade() {
                    watcher.recompute();
                }
            });

            let weak_size = weak.clone();
            let items_per_page_conn = pagination.items_per_page_changed.connect(move |_| {
                if let Some(watcher) = weak_size.upgrade() {
                    watcher.recompute();
                }
            });

            Self {
                pagination: pagination.clone(),
                sort_by: Property::new(sort_by),
                group_by: Property::new(group_by),
                search: Property::new(search),
                last_emitted: Mutex::new(None),
                settling: AtomicBool::new(false),
                on_change: Box::new(on_change),
                page_conn,
                items_per_page_conn,
            }
        });

        watcher.recompute();
        watcher
    }

    /// Replace the sort orderings.
    pub fn set_sort_by(&self, sort_by: Vec<SortItem>) {
        if self.sort_by.set(sort_by) {
            self.recompute();
        }
    }

    /// Replace the group orderings.
    pub fn set_group_by(&self, group_by: Vec<SortItem>) {
        if self.group_by.set(group_by) {
            self.recompute();
        }
    }

    /// Replace the search term.
    ///
    /// A change resets pagination to the first page before the resulting
    /// snapshot is emitted.
    pub fn set_search(&self, search: Option<String>) {
        if self.search.set(search) {
            self.recompute();
        }
    }

    /// Current sort orderings.
    pub fn sort_by(&self) -> Vec<SortItem> {
        self.sort_by.get()
    }

    /// Current group orderings.
    pub fn group_by(&self) -> Vec<SortItem> {
        self.group_by.get()
    }

    /// Current search term.
    pub fn search(&self) -> Option<String> {
        self.search.get()
    }

    /// Build a snapshot of the current (settled) input state.
    pub fn snapshot(&self) -> OptionsSnapshot {
        OptionsSnapshot {
            page: self.pagination.page(),
            items_per_page: self.pagination.items_per_page(),
            sort_by: self.sort_by.get(),
            group_by: self.group_by.get(),
            search: self.search.get(),
        }
    }

    /// The last snapshot handed to the consumer, if any.
    pub fn last_emitted(&self) -> Option<OptionsSnapshot> {
        self.last_emitted.lock().clone()
    }

    fn recompute(&self) {
        if self.settling.swap(true, Ordering::SeqCst) {
            // Nested notification from within settle(); that pass will
            // rebuild the snapshot after its mutation returns.
            return;
        }
        let emitted = self.settle();
        self.settling.store(false, Ordering::SeqCst);

        if let Some(snapshot) = emitted {
            tracing::debug!(
                target: "gridstate::options",
                page = snapshot.page,
                items_per_page = snapshot.items_per_page,
                search = ?snapshot.search,
                "options changed"
            );
            (self.on_change)(&snapshot);
        }
    }

    fn settle(&self) -> Option<OptionsSnapshot> {
        let mut last = self.last_emitted.lock();
        let candidate = self.snapshot();
        if last.as_ref() == Some(&candidate) {
            return None;
        }

        // First run has no previous search to differ from, so the baseline
        // keeps whatever page it was given.
        let search_changed = last
            .as_ref()
            .is_some_and(|previous| previous.search != candidate.search);

        let settled = if search_changed {
            self.pagination.set_page(1);
            self.snapshot()
        } else {
            candidate
        };

        *last = Some(settled.clone());
        Some(settled)
    }
}

impl Drop for OptionsWatcher {
    fn drop(&mut self) {
        self.pagination.page_changed.disconnect(self.page_conn);
        self.pagination
            .items_per_page_changed
            .disconnect(self.items_per_page_conn);
    }
}

impl std::fmt::Debug for OptionsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsWatcher")
            .field("last_emitted", &*self.last_emitted.lock())
            .finish()
    }
}

static_assertions::assert_impl_all!(OptionsWatcher: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::pagination::{PageInput, PaginationOptions};

    fn pagination_with(items_length: u64) -> Arc<Pagination> {
        let pagination = Arc::new(Pagination::default());
        pagination.set_items_length(items_length);
        pagination
    }

    fn recording_watcher(
        pagination: Arc<Pagination>,
    ) -> (Arc<OptionsWatcher>, Arc<Mutex<Vec<OptionsSnapshot>>>) {
        let emitted = Arc::new(Mutex::new(Vec::new()));
        let emitted_clone = emitted.clone();
        let watcher = OptionsWatcher::observe(
            pagination,
            Vec::new(),
            Vec::new(),
            None,
            move |snapshot| emitted_clone.lock().push(snapshot.clone()),
        );
        (watcher, emitted)
    }

    #[test]
    fn test_baseline_emitted_immediately() {
        let (_watcher, emitted) = recording_watcher(pagination_with(50));
        let emitted = emitted.lock();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].page, 1);
        assert_eq!(emitted[0].items_per_page, 10);
        assert_eq!(emitted[0].search, None);
    }

    #[test]
    fn test_identical_inputs_emit_once() {
        let (watcher, emitted) = recording_watcher(pagination_with(50));

        watcher.set_sort_by(Vec::new());
        watcher.set_group_by(Vec::new());
        watcher.set_search(None);

        assert_eq!(emitted.lock().len(), 1);
    }

    #[test]
    fn test_page_change_emits() {
        let pagination = pagination_with(50);
        let (_watcher, emitted) = recording_watcher(pagination.clone());

        pagination.next_page();

        let emitted = emitted.lock();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[1].page, 2);
    }

    #[test]
    fn test_clamped_navigation_emits_nothing() {
        let pagination = pagination_with(50);
        let (_watcher, emitted) = recording_watcher(pagination.clone());

        pagination.prev_page(); // already on page 1
        pagination.set_page(1);

        assert_eq!(emitted.lock().len(), 1);
    }

    #[test]
    fn test_sort_change_emits_with_precedence_order() {
        let (watcher, emitted) = recording_watcher(pagination_with(50));

        let sort = vec![SortItem::descending("age"), SortItem::ascending("name")];
        watcher.set_sort_by(sort.clone());

        let emitted = emitted.lock();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[1].sort_by, sort);

        // Same keys in a different order is a different query.
        drop(emitted);
        watcher.set_sort_by(vec![SortItem::ascending("name"), SortItem::descending("age")]);
        assert_eq!(watcher.last_emitted().unwrap().sort_by[0].key, "name");
    }

    #[test]
    fn test_search_change_resets_page_and_emits_once() {
        let pagination = pagination_with(95);
        let (watcher, emitted) = recording_watcher(pagination.clone());

        pagination.set_page(5);
        watcher.set_search(Some("a".into()));
        let before = emitted.lock().len();

        watcher.set_search(Some("b".into()));

        let emitted = emitted.lock();
        assert_eq!(emitted.len(), before + 1);
        let last = emitted.last().unwrap();
        assert_eq!(last.search.as_deref(), Some("b"));
        assert_eq!(last.page, 1);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_first_search_from_none_also_resets_page() {
        let pagination = pagination_with(95);
        let (watcher, emitted) = recording_watcher(pagination.clone());
        pagination.set_page(3);

        watcher.set_search(Some("query".into()));

        let last = emitted.lock().last().cloned().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_items_per_page_change_emits_settled_snapshot() {
        let pagination = pagination_with(95);
        let (_watcher, emitted) = recording_watcher(pagination.clone());
        pagination.set_page(5);

        let before = emitted.lock().len();
        pagination.set_items_per_page(25);

        let emitted = emitted.lock();
        // One settled emission: never a stale page 5 paired with the new size.
        assert_eq!(emitted.len(), before + 1);
        let last = emitted.last().unwrap();
        assert_eq!(last.items_per_page, 25);
        assert_eq!(last.page, 1);
    }

    #[test]
    fn test_baseline_keeps_initial_page() {
        let pagination = Arc::new(Pagination::new(PaginationOptions {
            page: PageInput::Number(3),
            items_per_page: PageInput::Number(10),
        }));
        pagination.set_items_length(95);

        let (_watcher, emitted) = recording_watcher(pagination);
        // No previous search to differ from: the baseline does not reset.
        assert_eq!(emitted.lock()[0].page, 3);
    }

    #[test]
    fn test_dropping_watcher_disconnects_from_pagination() {
        let pagination = pagination_with(50);
        assert_eq!(pagination.page_changed.connection_count(), 0);

        let (watcher, emitted) = recording_watcher(pagination.clone());
        assert_eq!(pagination.page_changed.connection_count(), 1);

        drop(watcher);
        assert_eq!(pagination.page_changed.connection_count(), 0);

        pagination.next_page();
        assert_eq!(emitted.lock().len(), 1);
    }

    #[test]
    fn test_snapshot_equality_is_structural() {
        let left = OptionsSnapshot {
            page: 1,
            items_per_page: 10,
            sort_by: vec![SortItem::ascending("a")],
            group_by: Vec::new(),
            search: Some("x".into()),
        };
        let mut right = left.clone();
        assert_eq!(left, right);

        right.sort_by[0].order = SortOrder::Descending;
        assert_ne!(left, right);
    }
}
