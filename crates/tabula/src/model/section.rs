//! The section model.
//!
//! A [`Section`] is one contiguous block of rows in a list or table, with
//! optional header and footer payloads. Every mutation of the row sequence is
//! recorded in the section's [`Modification`] ledger and reported to its
//! [`SectionObserver`], which exports the ledger as a [`SectionDiff`] and
//! clears it once the diff has been applied.
//!
//! # Example
//!
//! ```
//! use tabula::model::{IndexPath, Section};
//!
//! let mut section = Section::new();
//! section.add("a");
//! section.add("b");
//! section.insert("c", 0);
//!
//! let diff = section.diff_positions(1).unwrap();
//! assert_eq!(diff.insert, Some(vec![IndexPath::new(1, 0), IndexPath::new(1, 1)]));
//!
//! section.clear();
//! assert!(section.diff_positions(1).is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tabula_core::logging::targets;
use tabula_core::{Error, Result};

use super::diff::SectionDiff;
use super::ledger::Modification;
use super::observer::SectionObserver;
use super::row::Row;

/// A global counter for generating unique section IDs.
static SECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for a [`Section`].
///
/// Lets an observer that watches many sections tell them apart without
/// holding references to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(u64);

impl SectionId {
    fn next() -> Self {
        Self(SECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// An ordered block of heterogeneous rows with change tracking.
///
/// Rows are stored type-erased; lookups name the concrete type they expect
/// and skip rows of any other type.
///
/// # Change tracking
///
/// `add`, `insert` and `delete` record the affected position in the ledger
/// and notify the observer via
/// [`did_update_rows`](SectionObserver::did_update_rows). `reload_at` only
/// records. Recorded positions are not renumbered by later mutations, so the
/// ledger should be exported and cleared after each applied batch.
///
/// # Thread Safety
///
/// `Section` is `Send + Sync`, but every mutation takes `&mut self`; sharing
/// one across threads requires external synchronization.
pub struct Section {
    id: SectionId,
    header: Option<Row>,
    footer: Option<Row>,
    rows: Vec<Row>,
    ledger: Modification,
    observer: Option<Weak<dyn SectionObserver>>,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Section {
    /// Creates an empty section without header, footer or observer.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Creates a section holding `rows`.
    ///
    /// Initial rows are not recorded as insertions: the ledger starts empty.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            id: SectionId::next(),
            header: None,
            footer: None,
            rows,
            ledger: Modification::new(),
            observer: None,
        }
    }

    /// Sets the header payload (builder style).
    pub fn with_header<T: Any + Send + Sync>(mut self, header: T) -> Self {
        self.header = Some(Row::new(header));
        self
    }

    /// Sets the footer payload (builder style).
    pub fn with_footer<T: Any + Send + Sync>(mut self, footer: T) -> Self {
        self.footer = Some(Row::new(footer));
        self
    }

    /// Returns this section's unique identifier.
    pub fn id(&self) -> SectionId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Header and footer
    // -------------------------------------------------------------------------

    /// Returns the header payload.
    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    /// Returns the header payload if it is of type `T`.
    pub fn header_as<T: Any>(&self) -> Option<&T> {
        self.header.as_ref().and_then(Row::downcast_ref)
    }

    /// Replaces the header payload, returning the previous one.
    ///
    /// Headers are not tracked by the ledger; call
    /// [`set_needs_update`](Self::set_needs_update) to have it redrawn.
    pub fn set_header(&mut self, header: Option<Row>) -> Option<Row> {
        std::mem::replace(&mut self.header, header)
    }

    /// Returns the footer payload.
    pub fn footer(&self) -> Option<&Row> {
        self.footer.as_ref()
    }

    /// Returns the footer payload if it is of type `T`.
    pub fn footer_as<T: Any>(&self) -> Option<&T> {
        self.footer.as_ref().and_then(Row::downcast_ref)
    }

    /// Replaces the footer payload, returning the previous one.
    pub fn set_footer(&mut self, footer: Option<Row>) -> Option<Row> {
        std::mem::replace(&mut self.footer, footer)
    }

    // -------------------------------------------------------------------------
    // Observer
    // -------------------------------------------------------------------------

    /// Registers `observer` without taking ownership of it.
    ///
    /// Replaces any previous observer.
    pub fn set_observer<O: SectionObserver + 'static>(&mut self, observer: &Arc<O>) {
        let observer: Weak<O> = Arc::downgrade(observer);
        self.observer = Some(observer);
    }

    /// Unregisters the observer, if any.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Returns `true` if an observer is registered and still alive.
    pub fn has_observer(&self) -> bool {
        self.observer().is_some()
    }

    fn observer(&self) -> Option<Arc<dyn SectionObserver>> {
        self.observer.as_ref().and_then(Weak::upgrade)
    }

    fn notify_rows_updated(&self) {
        match self.observer() {
            Some(observer) => observer.did_update_rows(self),
            None => {
                tracing::trace!(target: targets::SECTION, id = self.id.0, "no observer to notify");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the section has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns all rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row at `position`.
    pub fn row(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Returns the row at `position` if it is of type `T`.
    pub fn row_as<T: Any>(&self, position: usize) -> Option<&T> {
        self.rows.get(position).and_then(Row::downcast_ref)
    }

    /// Returns the position of the first row of type `T` equal to `row`.
    pub fn position_of<T: Any + PartialEq>(&self, row: &T) -> Option<usize> {
        self.rows.iter().position(|candidate| candidate.matches(row))
    }

    /// Returns the first row of type `T` satisfying `predicate`.
    ///
    /// Rows of other types are skipped, never passed to `predicate`.
    pub fn content<T, P>(&self, mut predicate: P) -> Option<&T>
    where
        T: Any,
        P: FnMut(&T) -> bool,
    {
        self.rows
            .iter()
            .filter_map(Row::downcast_ref::<T>)
            .find(|content| predicate(content))
    }

    /// Iterates over the rows of type `T`, in display order.
    pub fn contents<T: Any>(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.iter().filter_map(Row::downcast_ref::<T>)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Appends `row` and records an insertion at the new last position.
    pub fn add<T: Any + Send + Sync>(&mut self, row: T) {
        self.rows.push(Row::new(row));
        let position = self.rows.len() - 1;
        self.ledger.insert(position);
        tracing::trace!(target: targets::SECTION, id = self.id.0, position, "added row");
        self.notify_rows_updated();
    }

    /// Inserts `row` at `position`, shifting later rows down.
    ///
    /// # Panics
    ///
    /// Panics if `position > len()`. An out-of-range position is a caller
    /// logic error; use [`try_insert`](Self::try_insert) for a checked variant.
    pub fn insert<T: Any + Send + Sync>(&mut self, row: T, position: usize) {
        self.rows.insert(position, Row::new(row));
        self.ledger.insert(position);
        tracing::trace!(target: targets::SECTION, id = self.id.0, position, "inserted row");
        self.notify_rows_updated();
    }

    /// Inserts `row` at `position`, or fails without recording anything.
    pub fn try_insert<T: Any + Send + Sync>(&mut self, row: T, position: usize) -> Result<()> {
        if position > self.rows.len() {
            return Err(Error::position_out_of_bounds(position, self.rows.len()));
        }
        self.insert(row, position);
        Ok(())
    }

    /// Removes the first row of type `T` equal to `row`.
    ///
    /// Records a deletion at the removed row's former position and returns
    /// the removed row. If no row matches, nothing changes and the observer
    /// is not notified.
    pub fn delete<T: Any + PartialEq>(&mut self, row: &T) -> Option<Row> {
        let Some(position) = self.position_of(row) else {
            tracing::trace!(target: targets::SECTION, id = self.id.0, "delete: row not found");
            return None;
        };
        let removed = self.rows.remove(position);
        self.ledger.delete(position);
        tracing::trace!(target: targets::SECTION, id = self.id.0, position, "deleted row");
        self.notify_rows_updated();
        Some(removed)
    }

    /// Records that the row at `position` must be redrawn in place.
    ///
    /// The row sequence is untouched and the observer is not notified.
    pub fn reload_at(&mut self, position: usize) {
        self.ledger.reload(position);
    }

    /// Records a reload for the first row of type `T` equal to `row`.
    ///
    /// No-op if no row matches.
    pub fn reload<T: Any + PartialEq>(&mut self, row: &T) {
        match self.position_of(row) {
            Some(position) => self.reload_at(position),
            None => {
                tracing::trace!(target: targets::SECTION, id = self.id.0, "reload: row not found");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Change tracking
    // -------------------------------------------------------------------------

    /// Returns the section's ledger.
    pub fn ledger(&self) -> &Modification {
        &self.ledger
    }

    /// Returns `true` if the ledger holds changes not yet cleared.
    pub fn has_pending_changes(&self) -> bool {
        !self.ledger.is_empty()
    }

    /// Exports the ledger as paths scoped to `section`.
    ///
    /// Returns `None` when nothing was recorded since the last clear.
    pub fn diff_positions(&self, section: usize) -> Option<SectionDiff> {
        let changes = self.ledger.export()?;
        Some(SectionDiff::from_changes(section, changes))
    }

    /// Clears the ledger after its diff has been applied.
    pub fn clear(&mut self) {
        self.ledger.clear();
    }

    /// Asks the observer to redraw the whole section.
    ///
    /// Bypasses incremental diffing; useful after header or footer changes or
    /// bulk replacement. Rows and ledger are untouched.
    pub fn set_needs_update(&self, needs_update: bool) {
        match self.observer() {
            Some(observer) => observer.section_needs_reload(self, needs_update),
            None => {
                tracing::trace!(
                    target: targets::SECTION,
                    id = self.id.0,
                    "no observer for reload request"
                );
            }
        }
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("rows", &self.rows)
            .field("ledger", &self.ledger)
            .field("has_observer", &self.has_observer())
            .finish()
    }
}

// Ensure Section is Send + Sync
static_assertions::assert_impl_all!(Section: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndexPath;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Rows(SectionId, usize),
        Reload(SectionId, bool),
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    impl SectionObserver for Recorder {
        fn did_update_rows(&self, section: &Section) {
            self.events
                .lock()
                .push(Event::Rows(section.id(), section.len()));
        }

        fn section_needs_reload(&self, section: &Section, needs_reload: bool) {
            self.events
                .lock()
                .push(Event::Reload(section.id(), needs_reload));
        }
    }

    fn observed() -> (Section, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let mut section = Section::new();
        section.set_observer(&recorder);
        (section, recorder)
    }

    fn strings(section: &Section) -> Vec<&'static str> {
        section.contents::<&'static str>().copied().collect()
    }

    #[test]
    fn test_add_records_last_position() {
        let (mut section, recorder) = observed();
        section.add("a");
        section.add("b");

        assert_eq!(section.len(), 2);
        let inserted: Vec<usize> = section.ledger().inserted().iter().copied().collect();
        assert_eq!(inserted, vec![0, 1]);
        let events = recorder.events.lock();
        assert_eq!(
            *events,
            vec![Event::Rows(section.id(), 1), Event::Rows(section.id(), 2)]
        );
    }

    #[test]
    fn test_insert_then_add_scenario() {
        let mut section = Section::new();
        section.add("a");
        section.add("b");
        section.insert("c", 0);

        assert_eq!(strings(&section), vec!["c", "a", "b"]);
        let changes = section.ledger().export().unwrap();
        assert_eq!(changes.insert, Some(vec![0, 1]));
        assert_eq!(changes.delete, None);
        assert_eq!(changes.reload, None);
    }

    #[test]
    #[should_panic]
    fn test_insert_out_of_range_panics() {
        let mut section = Section::new();
        section.insert("x", 1);
    }

    #[test]
    fn test_try_insert_out_of_range() {
        let (mut section, recorder) = observed();
        let err = section.try_insert("x", 3).unwrap_err();
        assert_eq!(err, Error::position_out_of_bounds(3, 0));
        assert!(section.is_empty());
        assert!(!section.has_pending_changes());
        assert!(recorder.events.lock().is_empty());

        section.try_insert("y", 0).unwrap();
        assert_eq!(strings(&section), vec!["y"]);
    }

    #[test]
    fn test_delete_scenario() {
        let mut section = Section::with_rows(vec![Row::new("a"), Row::new("b"), Row::new("c")]);
        let removed = section.delete(&"a");

        assert!(removed.is_some_and(|row| row.matches(&"a")));
        assert_eq!(strings(&section), vec!["b", "c"]);
        assert_eq!(section.ledger().export().unwrap().delete, Some(vec![0]));
        assert!(section.content::<&str, _>(|s| *s == "a").is_none());
    }

    #[test]
    fn test_delete_missing_row_is_noop() {
        let (mut section, recorder) = observed();
        section.add("a");
        section.clear();
        recorder.events.lock().clear();

        assert!(section.delete(&"zzz").is_none());
        assert_eq!(section.len(), 1);
        assert!(!section.has_pending_changes());
        assert!(recorder.events.lock().is_empty());
    }

    #[test]
    fn test_delete_is_type_filtered() {
        let mut section = Section::with_rows(vec![Row::new(1i32), Row::new(1i64)]);
        section.delete(&1i64);

        assert_eq!(section.len(), 1);
        assert!(section.row(0).is_some_and(|row| row.is::<i32>()));
        let deleted: Vec<usize> = section.ledger().deleted().iter().copied().collect();
        assert_eq!(deleted, vec![1]);
    }

    #[test]
    fn test_reload_at_does_not_notify() {
        let (mut section, recorder) = observed();
        section.reload_at(2);

        assert_eq!(section.ledger().export().unwrap().reload, Some(vec![2]));
        assert!(recorder.events.lock().is_empty());

        section.clear();
        assert!(section.ledger().export().is_none());
    }

    #[test]
    fn test_reload_by_value() {
        let mut section = Section::with_rows(vec![
            Row::new(String::from("x")),
            Row::new(String::from("y")),
        ]);
        section.reload(&String::from("y"));
        section.reload(&String::from("missing"));

        assert_eq!(section.ledger().export().unwrap().reload, Some(vec![1]));
    }

    #[test]
    fn test_content_skips_other_types() {
        let section = Section::with_rows(vec![
            Row::new(10u8),
            Row::new(String::from("ten")),
            Row::new(20u8),
        ]);

        assert_eq!(section.content::<u8, _>(|n| *n > 15), Some(&20));
        let text = section.content::<String, _>(|_| true);
        assert_eq!(text.map(String::as_str), Some("ten"));
        assert!(section.content::<u16, _>(|_| true).is_none());
        assert!(!section.has_pending_changes());
    }

    #[test]
    fn test_diff_positions() {
        let mut section = Section::with_rows(vec![Row::new("a"), Row::new("b")]);
        section.insert("z", 0);
        section.delete(&"a");

        let diff = section.diff_positions(3).unwrap();
        assert_eq!(diff.reload, None);
        assert_eq!(diff.delete, Some(vec![IndexPath::new(3, 1)]));
        assert_eq!(diff.insert, Some(vec![IndexPath::new(3, 0)]));
    }

    #[test]
    fn test_set_needs_update() {
        let (section, recorder) = observed();
        section.set_needs_update(true);
        section.set_needs_update(false);

        assert_eq!(
            *recorder.events.lock(),
            vec![
                Event::Reload(section.id(), true),
                Event::Reload(section.id(), false)
            ]
        );
        assert!(!section.has_pending_changes());
    }

    #[test]
    fn test_observer_is_weak() {
        let (mut section, recorder) = observed();
        assert!(section.has_observer());
        assert_eq!(Arc::strong_count(&recorder), 1);

        drop(recorder);
        assert!(!section.has_observer());

        // Mutations still record without an observer
        section.add("a");
        section.set_needs_update(true);
        assert!(section.has_pending_changes());
    }

    #[test]
    fn test_set_observer_with_concrete_type() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut section = Section::new();

        section.set_observer(&first);
        section.add(1u8);
        section.set_observer(&second);
        section.add(2u8);

        assert_eq!(*first.events.lock(), vec![Event::Rows(section.id(), 1)]);
        assert_eq!(*second.events.lock(), vec![Event::Rows(section.id(), 2)]);
    }

    #[test]
    fn test_clear_observer() {
        let (mut section, recorder) = observed();
        section.clear_observer();
        section.add("a");

        assert!(recorder.events.lock().is_empty());
    }

    #[test]
    fn test_header_and_footer() {
        let mut section = Section::new()
            .with_header(String::from("Fruits"))
            .with_footer(3usize);

        let header = section.header_as::<String>();
        assert_eq!(header.map(String::as_str), Some("Fruits"));
        assert_eq!(section.footer_as::<usize>(), Some(&3));
        assert!(section.header_as::<usize>().is_none());

        let previous = section.set_header(None);
        assert!(previous.is_some_and(|row| row.is::<String>()));
        assert!(section.header().is_none());
        assert!(section.set_footer(Some(Row::new(4usize))).is_some());
        assert!(!section.has_pending_changes());
    }

    #[test]
    fn test_unique_ids() {
        let a = Section::new();
        let b = Section::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id().as_u64() > 0);
    }

    #[test]
    fn test_row_accessors() {
        let section = Section::with_rows(vec![Row::new(1u32), Row::new("two")]);
        assert_eq!(section.row_as::<u32>(0), Some(&1));
        assert_eq!(section.row_as::<u32>(1), None);
        assert!(section.row(2).is_none());
        assert_eq!(section.position_of(&"two"), Some(1));
        assert_eq!(section.rows().len(), 2);
        assert!(format!("{:?}", section).contains("Row<u32>"));
    }
}
