//! Diff batches addressed by two-level positions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::index::IndexPath;
use super::ledger::LedgerChanges;

/// The pending changes of one section, scoped to its section index.
///
/// Each category is `None` when nothing of that kind happened. A
/// `SectionDiff` is only produced when at least one category is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDiff {
    /// Rows to redraw in place.
    pub reload: Option<Vec<IndexPath>>,
    /// Rows to remove, addressed as they were before removal.
    pub delete: Option<Vec<IndexPath>>,
    /// Rows to insert.
    pub insert: Option<Vec<IndexPath>>,
}

impl SectionDiff {
    /// Maps row-local ledger positions into `section`.
    pub fn from_changes(section: usize, changes: LedgerChanges) -> Self {
        let scope = |rows: Option<Vec<usize>>| {
            rows.map(|rows| {
                rows.into_iter()
                    .map(|row| IndexPath::new(section, row))
                    .collect()
            })
        };
        Self {
            reload: scope(changes.reload),
            delete: scope(changes.delete),
            insert: scope(changes.insert),
        }
    }

    /// Returns `true` if no category holds a path.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total number of paths across all categories.
    pub fn len(&self) -> usize {
        [&self.reload, &self.delete, &self.insert]
            .into_iter()
            .flatten()
            .map(Vec::len)
            .sum()
    }
}

/// The result of flushing every pending section of a provider.
///
/// Sections that asked for a wholesale redraw are listed in
/// `reload_sections` and carry no incremental diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffBatch {
    diffs: BTreeMap<usize, SectionDiff>,
    reload_sections: BTreeSet<usize>,
}

impl DiffBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the incremental diff of the section at `section`.
    ///
    /// Ignored if that section is already scheduled for a wholesale reload.
    pub fn insert_diff(&mut self, section: usize, diff: SectionDiff) {
        if diff.is_empty() || self.reload_sections.contains(&section) {
            return;
        }
        self.diffs.insert(section, diff);
    }

    /// Schedules the section at `section` for a wholesale reload.
    ///
    /// Any incremental diff already recorded for it is dropped.
    pub fn request_reload(&mut self, section: usize) {
        self.diffs.remove(&section);
        self.reload_sections.insert(section);
    }

    /// Returns `true` if the batch carries nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty() && self.reload_sections.is_empty()
    }

    /// Returns the incremental diff of one section, if any.
    pub fn diff(&self, section: usize) -> Option<&SectionDiff> {
        self.diffs.get(&section)
    }

    /// Iterates over `(section index, diff)` pairs in section order.
    pub fn diffs(&self) -> impl Iterator<Item = (usize, &SectionDiff)> + '_ {
        self.diffs.iter().map(|(&section, diff)| (section, diff))
    }

    /// Returns the sections to redraw wholesale, in ascending order.
    pub fn reload_sections(&self) -> &BTreeSet<usize> {
        &self.reload_sections
    }

    /// All reload paths across sections, in list order.
    pub fn reload_paths(&self) -> Vec<IndexPath> {
        self.collect(|diff| diff.reload.as_deref())
    }

    /// All delete paths across sections, in list order.
    pub fn delete_paths(&self) -> Vec<IndexPath> {
        self.collect(|diff| diff.delete.as_deref())
    }

    /// All insert paths across sections, in list order.
    pub fn insert_paths(&self) -> Vec<IndexPath> {
        self.collect(|diff| diff.insert.as_deref())
    }

    fn collect<F>(&self, category: F) -> Vec<IndexPath>
    where
        F: Fn(&SectionDiff) -> Option<&[IndexPath]>,
    {
        self.diffs
            .values()
            .filter_map(category)
            .flatten()
            .copied()
            .collect()
    }
}
