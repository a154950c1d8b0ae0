//! Two-level positions for addressing rows across sections.
//!
//! A [`Section`](super::Section) records changes with row-local positions.
//! Once a diff leaves the section and is applied to a whole sectioned list, each
//! position is paired with the index of the section it belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a row position within a sectioned list.
///
/// `IndexPath` combines a section index with a row position inside that
/// section. Paths order by section first, then by row, which is the order a
/// list view lays them out.
///
/// # Index Validity
///
/// Paths are snapshots. After rows are inserted or removed, previously
/// obtained paths may address a different row, or none at all.
///
/// # Example
///
/// ```
/// use tabula::model::IndexPath;
///
/// let path = IndexPath::new(2, 5);
/// assert_eq!(path.section(), 2);
/// assert_eq!(path.row(), 5);
/// assert_eq!(path.to_string(), "2:5");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct IndexPath {
    /// The section index within the list.
    section: usize,
    /// The row within the section.
    row: usize,
}

impl IndexPath {
    /// Creates a path to `row` inside `section`.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the section index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row position within the section.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Creates a path to another row in the same section.
    #[inline]
    pub const fn sibling(&self, row: usize) -> Self {
        Self::new(self.section, row)
    }

    /// Creates a path to the same row position in another section.
    #[inline]
    pub const fn in_section(&self, section: usize) -> Self {
        Self::new(section, self.row)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.row)
    }
}
