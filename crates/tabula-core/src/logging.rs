//! Logging facilities for Tabula.
//!
//! Tabula uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("tabula=trace")
//!         .init();
//! }
//! ```
//!
//! Row mutations are logged at `trace`, provider flushes at `debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Section mutation target.
    pub const SECTION: &str = "tabula::section";
    /// Modification ledger target.
    pub const LEDGER: &str = "tabula::ledger";
    /// Data provider (coordinator) target.
    pub const PROVIDER: &str = "tabula::provider";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "tabula_core::signal";
    /// Timing spans opened by [`PerfSpan`](super::PerfSpan).
    pub const PERF: &str = "tabula::perf";
}

/// Span names used throughout Tabula for tracing.
pub mod span_names {
    /// Provider flush span.
    pub const FLUSH: &str = "tabula::flush";
    /// Signal emission span.
    pub const SIGNAL: &str = "tabula::signal";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for tracking the duration of an operation such as a flush.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
