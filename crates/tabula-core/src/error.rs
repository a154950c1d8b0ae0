//! Error types for Tabula.
//!
//! Most model operations never fail: a missing row is a benign race between a
//! view and its backing data and is treated as a no-op. The errors here cover
//! the checked APIs (bounds-checked insertion, section lookup on a provider)
//! and configuration loading.

/// Result type alias for Tabula operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Tabula operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A row position was outside `[0, len]` for an insertion.
    #[error("row position {position} is out of bounds for a section of {len} rows")]
    PositionOutOfBounds { position: usize, len: usize },

    /// A section index did not address a section of the provider.
    #[error("section index {index} is out of bounds for {count} sections")]
    SectionOutOfBounds { index: usize, count: usize },

    /// Configuration could not be parsed or was inconsistent.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a row position error.
    pub fn position_out_of_bounds(position: usize, len: usize) -> Self {
        Self::PositionOutOfBounds { position, len }
    }

    /// Create a section index error.
    pub fn section_out_of_bounds(index: usize, count: usize) -> Self {
        Self::SectionOutOfBounds { index, count }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
