//! Section models with position-based change tracking.
//!
//! This module provides the types for keeping a list or table surface in sync
//! with its backing data one section at a time:
//!
//! - Mutations are applied to a [`Section`]
//! - Each mutation is recorded by the section's [`Modification`] ledger
//! - The section's [`SectionObserver`] is told that rows changed
//! - The observer exports the ledger as a [`SectionDiff`], applies it to the
//!   visual list, and clears the section
//!
//! # Core Types
//!
//! - `Row`: Type-erased row content, looked up by concrete type
//! - `Modification`: The ledger of inserted, deleted and reloaded positions
//! - `Section`: Ordered rows plus header/footer, driving a ledger
//! - `IndexPath`: A two-level (section, row) position
//! - `SectionDiff` / `DiffBatch`: Exported changes ready to apply
//! - `DataProvider`: A coordinator owning many sections
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  did_update_rows  ┌──────────────┐   DiffBatch   ┌─────────────┐
//! │   Section   │──────────────────>│   Observer   │──────────────>│    View     │
//! │   (rows)    │                   │(DataProvider)│               │             │
//! └─────────────┘                   └──────────────┘               └─────────────┘
//!       │                                  │
//!       │         ┌──────────────┐         │
//!       └────────>│ Modification │<────────┘
//!                 │   (ledger)   │  export, clear
//!                 └──────────────┘
//! ```

mod diff;
mod index;
mod ledger;
mod observer;
mod provider;
mod row;
mod section;

pub use diff::{DiffBatch, SectionDiff};
pub use index::IndexPath;
pub use ledger::{LedgerChanges, Modification};
pub use observer::SectionObserver;
pub use provider::{DataProvider, ProviderSignals};
pub use row::Row;
pub use section::{Section, SectionId};
