//! Core systems for Tabula.
//!
//! This crate provides the infrastructure shared by the Tabula model crate:
//!
//! - **Errors**: [`Error`] and the [`Result`] alias for checked operations
//! - **Signal/Slot System**: [`Signal`] for publishing model events to views
//! - **Logging**: tracing targets and the [`PerfSpan`] timing guard
//!
//! # Signal/Slot Example
//!
//! ```
//! use tabula_core::Signal;
//!
//! let diff_ready = Signal::<Vec<usize>>::new();
//!
//! let conn_id = diff_ready.connect(|rows| {
//!     println!("{} rows changed", rows.len());
//! });
//!
//! diff_ready.emit(vec![0, 1, 2]);
//! diff_ready.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Error, Result};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
