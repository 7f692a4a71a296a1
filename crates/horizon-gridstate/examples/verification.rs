//! Horizon GridState Verification Example
//!
//! Console walkthrough of the list-state engines with logging enabled:
//! - Pagination: navigation, clamping, page-size changes
//! - Options: deduplicated snapshot emissions, search-resets-page
//! - Expansion: identity-keyed membership and the published sequence
//!
//! Run with: cargo run -p horizon-gridstate --example verification
//!
//! Engine internals log under the `gridstate::*` targets; override the
//! filter with e.g. `RUST_LOG=gridstate::options=trace`.

use horizon_gridstate::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridstate=debug")),
        )
        .init();

    println!("=== Horizon GridState verification ===");
    println!();

    let table: TableState<String> = TableState::builder()
        .page("2")
        .items_per_page(10)
        .sort_by(vec![SortItem::ascending("name")])
        .build(|snapshot| {
            println!(
                "  -> on_change: page {} / size {} / sort {:?} / search {:?}",
                snapshot.page,
                snapshot.items_per_page,
                snapshot
                    .sort_by
                    .iter()
                    .map(|item| item.key.as_str())
                    .collect::<Vec<_>>(),
                snapshot.search,
            );
        });

    println!("[pagination] feeding 95 items");
    table.set_items_length(95);

    let pagination = table.pagination();
    println!(
        "[pagination] page {} of {}, window {}..{}",
        pagination.page(),
        pagination.page_count(),
        pagination.start_index(),
        pagination.stop_index(),
    );

    println!("[pagination] jumping past the end (clamps to the last page)");
    pagination.set_page(99);
    println!(
        "[pagination] page {} -> window {}..{}",
        pagination.page(),
        pagination.start_index(),
        pagination.stop_index(),
    );

    println!("[options] redundant set_page emits nothing");
    pagination.set_page(pagination.page());

    println!("[options] searching resets to the first page");
    table.options().set_search(Some("acme".into()));

    println!("[options] page size change settles before notifying");
    pagination.set_items_per_page(25);

    println!("[expansion] opening detail rows");
    let expansion = table.expansion();
    expansion.expanded_changed.connect(|open: &Vec<String>| {
        println!("  -> expanded rows: {open:?}");
    });
    expansion.expand("row-3".to_string(), true);
    expansion.toggle_expand("row-7".to_string());
    expansion.expand("row-3".to_string(), false);

    println!();
    println!("=== done ===");
}
