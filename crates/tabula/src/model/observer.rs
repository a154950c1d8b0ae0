//! The section observer contract.

use super::section::Section;

/// Receives notifications from a [`Section`].
///
/// A section holds its observer weakly: it never keeps the observer alive,
/// and a missing or dropped observer is silently skipped. Notifications are
/// synchronous and delivered after the section has already changed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tabula::model::{Section, SectionObserver};
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl SectionObserver for Counter {
///     fn did_update_rows(&self, _section: &Section) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
///
///     fn section_needs_reload(&self, _section: &Section, _needs_reload: bool) {}
/// }
///
/// let counter = Arc::new(Counter::default());
/// let mut section = Section::new();
/// section.set_observer(&counter);
/// section.add("row");
/// assert_eq!(counter.0.load(Ordering::SeqCst), 1);
/// ```
pub trait SectionObserver: Send + Sync {
    /// Called after the section's row sequence changed.
    ///
    /// The observer may now export the section's diff, apply it, and then
    /// have the section cleared.
    fn did_update_rows(&self, section: &Section);

    /// Called when the section asks for a wholesale redraw.
    ///
    /// `needs_reload` carries the flag passed to
    /// [`Section::set_needs_update`]; incremental diffing should be skipped
    /// while it is `true`.
    fn section_needs_reload(&self, section: &Section, needs_reload: bool);
}
