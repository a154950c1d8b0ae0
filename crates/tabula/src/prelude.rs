//! Prelude module for Tabula.
//!
//! ```ignore
//! use tabula::prelude::*;
//! ```

pub use crate::config::ProviderConfig;
pub use crate::model::{
    DataProvider, DiffBatch, IndexPath, Modification, ProviderSignals, Row, Section, SectionDiff,
    SectionId, SectionObserver,
};
pub use crate::signal::{ConnectionId, Signal};
pub use crate::{Error, Result};
