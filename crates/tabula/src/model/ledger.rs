//! The modification ledger.
//!
//! A [`Modification`] accumulates the row positions a section has inserted,
//! deleted, or marked for reload since the ledger was last cleared. A view
//! exports it, applies the positions to its visual list, and clears it.
//!
//! The three kinds are independent sets. Positions are recorded as they were
//! at the time of each mutation and are never renumbered by later mutations,
//! so a ledger should be exported and cleared after every applied batch.

use std::collections::BTreeSet;

use tabula_core::logging::targets;

/// Pending row changes, exported by [`Modification::export`].
///
/// Each category is `None` when nothing of that kind was recorded. Positions
/// are ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerChanges {
    /// Positions whose content changed in place.
    pub reload: Option<Vec<usize>>,
    /// Positions removed, as they were before removal.
    pub delete: Option<Vec<usize>>,
    /// Positions newly added.
    pub insert: Option<Vec<usize>>,
}

/// Records row positions changed since the last clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modification {
    inserted: BTreeSet<usize>,
    deleted: BTreeSet<usize>,
    reloaded: BTreeSet<usize>,
}

impl Modification {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an insertion at `position`.
    ///
    /// Recording the same position twice has no further effect.
    pub fn insert(&mut self, position: usize) {
        self.inserted.insert(position);
        tracing::trace!(target: targets::LEDGER, position, "recorded insert");
    }

    /// Records a deletion at `position`.
    pub fn delete(&mut self, position: usize) {
        self.deleted.insert(position);
        tracing::trace!(target: targets::LEDGER, position, "recorded delete");
    }

    /// Records that the row at `position` must be redrawn in place.
    pub fn reload(&mut self, position: usize) {
        self.reloaded.insert(position);
        tracing::trace!(target: targets::LEDGER, position, "recorded reload");
    }

    /// Forgets every recorded position.
    pub fn clear(&mut self) {
        self.inserted.clear();
        self.deleted.clear();
        self.reloaded.clear();
    }

    /// Returns `true` if nothing has been recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty() && self.reloaded.is_empty()
    }

    /// Returns the total number of recorded positions across all kinds.
    pub fn len(&self) -> usize {
        self.inserted.len() + self.deleted.len() + self.reloaded.len()
    }

    /// Returns the recorded insert positions.
    pub fn inserted(&self) -> &BTreeSet<usize> {
        &self.inserted
    }

    /// Returns the recorded delete positions.
    pub fn deleted(&self) -> &BTreeSet<usize> {
        &self.deleted
    }

    /// Returns the recorded reload positions.
    pub fn reloaded(&self) -> &BTreeSet<usize> {
        &self.reloaded
    }

    /// Exports the recorded positions.
    ///
    /// Returns `None` when nothing was recorded, so callers can skip applying
    /// a diff entirely instead of applying an empty one.
    pub fn export(&self) -> Option<LedgerChanges> {
        if self.is_empty() {
            return None;
        }
        Some(LedgerChanges {
            reload: positions(&self.reloaded),
            delete: positions(&self.deleted),
            insert: positions(&self.inserted),
        })
    }
}

fn positions(set: &BTreeSet<usize>) -> Option<Vec<usize>> {
    (!set.is_empty()).then(|| set.iter().copied().collect())
}
