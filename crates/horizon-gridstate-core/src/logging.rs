//! Logging facilities for Horizon GridState.
//!
//! The crates instrument themselves with the `tracing` crate. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Every event carries one of the targets below, so subsystems can be
//! filtered individually, e.g. `RUST_LOG=gridstate::options=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Signal emission and connection bookkeeping.
    pub const SIGNAL: &str = "gridstate::signal";
    /// View scope provide/consume events.
    pub const SCOPE: &str = "gridstate::scope";
    /// Page navigation, clamping, and input coercion.
    pub const PAGINATION: &str = "gridstate::pagination";
    /// Options snapshot recomputation and emission.
    pub const OPTIONS: &str = "gridstate::options";
    /// Expansion membership changes.
    pub const EXPANSION: &str = "gridstate::expansion";
}
