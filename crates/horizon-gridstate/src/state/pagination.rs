//! Pagination state for list views.
//!
//! [`Pagination`] is the single source of truth for which slice of a list is
//! visible and how to navigate it. The host view owns the raw item data and
//! keeps [`Pagination::set_items_length`] fed as data loads; the engine
//! derives the visible window (`start_index`, `stop_index`, `page_count`)
//! from the current page and page size.
//!
//! Navigation never fails: out-of-range pages are clamped into
//! `1..=page_count` and malformed construction inputs are coerced, so there
//! is no error surface on this type at all.
//!
//! # Example
//!
//! ```
//! use horizon_gridstate::state::{Pagination, PaginationOptions};
//!
//! let pagination = Pagination::new(PaginationOptions::default());
//! pagination.set_items_length(95);
//!
//! assert_eq!(pagination.page_count(), 10);
//! pagination.set_page(10);
//! assert_eq!(pagination.start_index(), 90);
//! assert_eq!(pagination.stop_index(), 95);
//! ```

use horizon_gridstate_core::{Property, Signal};

/// Sentinel page size meaning "all items, no paging".
pub const ITEMS_PER_PAGE_ALL: i64 = -1;

/// A page or page-size input as supplied by a host.
///
/// Hosts bind these values from user-facing sources (query strings, saved
/// view settings), so both integers and numeric strings are accepted. A
/// string that does not parse as an integer falls back to the field's
/// default with a warning rather than poisoning the derived arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageInput {
    /// An integer value, used as-is.
    Number(i64),
    /// A string value, parsed as a decimal integer.
    Text(String),
}

impl PageInput {
    fn resolve(&self, default: i64) -> i64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => n,
                Err(_) => {
                    tracing::warn!(
                        target: "gridstate::pagination",
                        input = %s,
                        default,
                        "non-numeric pagination input, using default"
                    );
                    default
                }
            },
        }
    }
}

impl From<i64> for PageInput {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PageInput {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for PageInput {
    fn from(value: u64) -> Self {
        Self::Number(value.try_into().unwrap_or(i64::MAX))
    }
}

impl From<&str> for PageInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PageInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Initial inputs for [`Pagination::new`].
#[derive(Debug, Clone)]
pub struct PaginationOptions {
    /// Initial 1-based page. Defaults to `1`.
    pub page: PageInput,
    /// Initial page size, or [`ITEMS_PER_PAGE_ALL`]. Defaults to `10`.
    pub items_per_page: PageInput,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: PageInput::Number(1),
            items_per_page: PageInput::Number(10),
        }
    }
}

/// Pagination engine: current page, page size, and the derived visible window.
///
/// All state lives behind interior mutability so the engine can be shared
/// with the host behind an `Arc` and mutated through `&self`. Each field
/// change emits the corresponding `*_changed` signal after the full update
/// settles, so observers never see a stale `page` paired with a new page
/// size or item count.
///
/// The page size is stored as `i64` with [`ITEMS_PER_PAGE_ALL`] (`-1`)
/// meaning "no paging"; the sentinel passes through the host's two-way
/// binding unchanged. Any non-positive page size is normalized to the
/// sentinel.
pub struct Pagination {
    page: Property<u64>,
    items_per_page: Property<i64>,
    items_length: Property<u64>,

    /// Emitted with the new page after any page transition.
    pub page_changed: Signal<u64>,
    /// Emitted with the new page size after [`set_items_per_page`](Self::set_items_per_page).
    pub items_per_page_changed: Signal<i64>,
    /// Emitted with the new item count after [`set_items_length`](Self::set_items_length).
    pub items_length_changed: Signal<u64>,
}

impl Pagination {
    /// Create a pagination engine from host-supplied inputs.
    ///
    /// Inputs are coerced (numeric strings parsed, non-positive page raised
    /// to 1, non-positive page size normalized to the all-items sentinel)
    /// but never clamped against the item count: the count is still zero at
    /// this point, and clamping a persisted page before data arrives would
    /// discard it. The shrink-clamp first runs on
    /// [`set_items_length`](Self::set_items_length).
    pub fn new(options: PaginationOptions) -> Self {
        let page = options.page.resolve(1).max(1) as u64;
        let items_per_page = normalize_items_per_page(options.items_per_page.resolve(10));

        Self {
            page: Property::new(page),
            items_per_page: Property::new(items_per_page),
            items_length: Property::new(0),
            page_changed: Signal::new(),
            items_per_page_changed: Signal::new(),
            items_length_changed: Signal::new(),
        }
    }

    /// Current 1-based page.
    pub fn page(&self) -> u64 {
        self.page.get()
    }

    /// Current page size, or [`ITEMS_PER_PAGE_ALL`].
    pub fn items_per_page(&self) -> i64 {
        self.items_per_page.get()
    }

    /// Total item count as last supplied by the host.
    pub fn items_length(&self) -> u64 {
        self.items_length.get()
    }

    /// Number of pages for the current item count and page size.
    ///
    /// Always at least 1: an empty list and the all-items sentinel both
    /// produce a single page.
    pub fn page_count(&self) -> u64 {
        let items_per_page = self.items_per_page.get();
        let items_length = self.items_length.get();
        if items_per_page == ITEMS_PER_PAGE_ALL || items_length == 0 {
            1
        } else {
            items_length.div_ceil(items_per_page as u64)
        }
    }

    /// Index of the first visible item.
    ///
    /// Saturates: before the host feeds an item count, the page is not yet
    /// clamped and an absurd persisted page must not panic the arithmetic.
    pub fn start_index(&self) -> u64 {
        let items_per_page = self.items_per_page.get();
        if items_per_page == ITEMS_PER_PAGE_ALL {
            0
        } else {
            (items_per_page as u64).saturating_mul(self.page.get() - 1)
        }
    }

    /// One past the index of the last visible item.
    pub fn stop_index(&self) -> u64 {
        let items_length = self.items_length.get();
        let items_per_page = self.items_per_page.get();
        if items_per_page == ITEMS_PER_PAGE_ALL {
            items_length
        } else {
            items_length.min(self.start_index().saturating_add(items_per_page as u64))
        }
    }

    /// Advance to the next page. No-op when already on the last page.
    pub fn next_page(&self) {
        self.set_page(self.page.get().saturating_add(1));
    }

    /// Go back to the previous page. No-op when already on the first page.
    pub fn prev_page(&self) {
        self.set_page(self.page.get().saturating_sub(1).max(1));
    }

    /// Set the current page, clamped into `1..=page_count`.
    pub fn set_page(&self, page: u64) {
        let clamped = page.clamp(1, self.page_count());
        if clamped != page {
            tracing::debug!(
                target: "gridstate::pagination",
                requested = page,
                clamped,
                "page clamped into range"
            );
        }
        if self.page.set(clamped) {
            self.page_changed.emit(clamped);
        }
    }

    /// Set the page size and return to the first page.
    ///
    /// Changing the page size always resets to page 1; keeping the old page
    /// would leave it pointing at an arbitrary (possibly invalid) window.
    /// Both fields are updated before either signal fires, so observers of
    /// `items_per_page_changed` already see `page == 1`.
    pub fn set_items_per_page(&self, items_per_page: i64) {
        let normalized = normalize_items_per_page(items_per_page);
        let size_changed = self.items_per_page.set(normalized);
        let page_changed = self.page.set(1);

        if size_changed {
            self.items_per_page_changed.emit(normalized);
        }
        if page_changed {
            self.page_changed.emit(1);
        }
    }

    /// Feed the current total item count from the host.
    ///
    /// When the count shrinks enough that `page_count` drops below the
    /// current page (a filter narrowed the data, say), the page is clamped
    /// down to the new last page. As with `set_items_per_page`, state
    /// settles before signals fire.
    pub fn set_items_length(&self, items_length: u64) {
        let length_changed = self.items_length.set(items_length);

        let page_count = self.page_count();
        let page_changed = if self.page.get() > page_count {
            tracing::debug!(
                target: "gridstate::pagination",
                page_count,
                "item count shrank below current page, clamping"
            );
            self.page.set(page_count)
        } else {
            false
        };

        if length_changed {
            self.items_length_changed.emit(items_length);
        }
        if page_changed {
            self.page_changed.emit(self.page.get());
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PaginationOptions::default())
    }
}

impl std::fmt::Debug for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pagination")
            .field("page", &self.page())
            .field("items_per_page", &self.items_per_page())
            .field("items_length", &self.items_length())
            .field("page_count", &self.page_count())
            .finish()
    }
}

fn normalize_items_per_page(value: i64) -> i64 {
    if value <= 0 {
        if value != ITEMS_PER_PAGE_ALL {
            tracing::debug!(
                target: "gridstate::pagination",
                value,
                "non-positive page size normalized to all-items"
            );
        }
        ITEMS_PER_PAGE_ALL
    } else {
        value
    }
}

static_assertions::assert_impl_all!(Pagination: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn paged(items_length: u64, items_per_page: i64) -> Pagination {
        let pagination = Pagination::new(PaginationOptions {
            items_per_page: PageInput::Number(items_per_page),
            ..PaginationOptions::default()
        });
        pagination.set_items_length(items_length);
        pagination
    }

    #[test]
    fn test_page_count_is_ceiling_of_length_over_size() {
        assert_eq!(paged(95, 10).page_count(), 10);
        assert_eq!(paged(100, 10).page_count(), 10);
        assert_eq!(paged(101, 10).page_count(), 11);
        assert_eq!(paged(1, 10).page_count(), 1);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        assert_eq!(paged(0, 10).page_count(), 1);
    }

    #[test]
    fn test_all_items_sentinel() {
        let pagination = paged(42, ITEMS_PER_PAGE_ALL);
        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.start_index(), 0);
        assert_eq!(pagination.stop_index(), 42);
    }

    #[test]
    fn test_last_page_window() {
        let pagination = paged(95, 10);
        pagination.set_page(10);
        assert_eq!(pagination.start_index(), 90);
        assert_eq!(pagination.stop_index(), 95);

        // Already on the last page: next_page clamps and stays.
        pagination.next_page();
        assert_eq!(pagination.page(), 10);
    }

    #[test]
    fn test_prev_page_at_first_is_noop() {
        let pagination = paged(30, 10);
        pagination.prev_page();
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_set_page_clamps_out_of_range() {
        let pagination = paged(30, 10);
        pagination.set_page(99);
        assert_eq!(pagination.page(), 3);
        pagination.set_page(0);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_window_stays_within_items_length() {
        let pagination = paged(95, 10);
        for page in 1..=pagination.page_count() {
            pagination.set_page(page);
            assert!(pagination.start_index() <= pagination.stop_index());
            assert!(pagination.stop_index() <= pagination.items_length());
        }
    }

    #[test]
    fn test_set_items_per_page_resets_to_first_page() {
        let pagination = paged(95, 10);
        pagination.set_page(7);

        pagination.set_items_per_page(25);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_count(), 4);
    }

    #[test]
    fn test_switch_to_all_items() {
        let pagination = paged(42, 10);
        pagination.set_page(3);

        pagination.set_items_per_page(ITEMS_PER_PAGE_ALL);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.start_index(), 0);
        assert_eq!(pagination.stop_index(), 42);
    }

    #[test]
    fn test_zero_page_size_means_all_items() {
        let pagination = paged(42, 0);
        assert_eq!(pagination.items_per_page(), ITEMS_PER_PAGE_ALL);
        assert_eq!(pagination.page_count(), 1);
    }

    #[test]
    fn test_shrinking_item_count_clamps_page() {
        let pagination = paged(95, 10);
        pagination.set_page(10);

        pagination.set_items_length(35);
        assert_eq!(pagination.page_count(), 4);
        assert_eq!(pagination.page(), 4);
    }

    #[test]
    fn test_stale_page_clamps_when_count_recomputes_to_empty() {
        let pagination = Pagination::new(PaginationOptions {
            page: PageInput::Number(3),
            items_per_page: PageInput::Number(10),
        });
        // No clamp at construction: the persisted page survives until data
        // (or an explicit zero) arrives from the host.
        assert_eq!(pagination.page(), 3);

        pagination.set_items_length(0);
        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_oversized_initial_page_saturates_window() {
        // The clamp is deferred until data arrives, so an absurd persisted
        // page is live state for a while; the derived window must not panic.
        let pagination = Pagination::new(PaginationOptions {
            page: PageInput::Number(i64::MAX),
            items_per_page: PageInput::Number(10),
        });
        assert_eq!(pagination.start_index(), u64::MAX);
        assert_eq!(pagination.stop_index(), 0);

        pagination.set_items_length(95);
        assert_eq!(pagination.page(), 10);
        assert_eq!(pagination.start_index(), 90);
        assert_eq!(pagination.stop_index(), 95);
    }

    #[test]
    fn test_numeric_string_inputs() {
        let pagination = Pagination::new(PaginationOptions {
            page: PageInput::from("4"),
            items_per_page: PageInput::from(" 25 "),
        });
        assert_eq!(pagination.page(), 4);
        assert_eq!(pagination.items_per_page(), 25);
    }

    #[test]
    fn test_non_numeric_input_falls_back_to_defaults() {
        let pagination = Pagination::new(PaginationOptions {
            page: PageInput::from("bogus"),
            items_per_page: PageInput::from("ten"),
        });
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.items_per_page(), 10);
    }

    #[test]
    fn test_page_changed_emitted_after_state_settles() {
        let pagination = Arc::new(paged(95, 10));
        pagination.set_page(7);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let pagination_clone = pagination.clone();
        pagination.items_per_page_changed.connect(move |&size| {
            // The page reset has already settled when the size notification
            // arrives.
            seen_clone.lock().push((size, pagination_clone.page()));
        });

        pagination.set_items_per_page(20);
        assert_eq!(*seen.lock(), vec![(20, 1)]);
    }

    #[test]
    fn test_set_page_to_current_value_emits_nothing() {
        let pagination = paged(95, 10);
        pagination.set_page(5);

        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        pagination.page_changed.connect(move |_| *count_clone.lock() += 1);

        pagination.set_page(5);
        assert_eq!(*count.lock(), 0);
    }
}
