//! A coordinator for multi-section lists.
//!
//! [`DataProvider`] owns an ordered list of sections and observes all of them.
//! Views connect to its [`ProviderSignals`], mutate sections through
//! [`section_mut`](DataProvider::section_mut), and call
//! [`flush`](DataProvider::flush) to turn every pending ledger into one
//! [`DiffBatch`] addressed by [`IndexPath`](super::IndexPath)s.
//!
//! # Example
//!
//! ```
//! use tabula::model::{DataProvider, IndexPath, Section};
//!
//! let mut provider = DataProvider::new();
//! provider.push_section(Section::new());
//! provider.push_section(Section::new());
//!
//! provider.section_mut(1).unwrap().add("hello");
//!
//! let batch = provider.flush().unwrap();
//! assert_eq!(batch.insert_paths(), vec![IndexPath::new(1, 0)]);
//! assert!(provider.flush().is_none());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tabula_core::logging::{span_names, targets};
use tabula_core::{Error, PerfSpan, Result, Signal};

use super::diff::DiffBatch;
use super::observer::SectionObserver;
use super::section::{Section, SectionId};
use crate::config::ProviderConfig;

/// Signals emitted by a [`DataProvider`].
pub struct ProviderSignals {
    /// Emitted after rows of a section changed.
    pub rows_updated: Signal<SectionId>,
    /// Emitted when a section asks for (or withdraws) a wholesale reload.
    /// Args: (section id, needs reload)
    pub reload_requested: Signal<(SectionId, bool)>,
    /// Emitted after sections were added or removed; section indices shifted.
    pub sections_changed: Signal<()>,
    /// Emitted by [`DataProvider::flush`] with a non-empty batch.
    pub diff_ready: Signal<DiffBatch>,
}

impl Default for ProviderSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderSignals {
    /// Creates a new set of provider signals.
    pub fn new() -> Self {
        Self {
            rows_updated: Signal::new(),
            reload_requested: Signal::new(),
            sections_changed: Signal::new(),
            diff_ready: Signal::new(),
        }
    }

    fn set_blocked(&self, blocked: bool) {
        self.rows_updated.set_blocked(blocked);
        self.reload_requested.set_blocked(blocked);
        self.sections_changed.set_blocked(blocked);
        self.diff_ready.set_blocked(blocked);
    }
}

/// The observer registered with every owned section.
///
/// Sections only hold it weakly; the provider owns the sole strong reference.
struct ProviderObserver {
    /// Latest wholesale reload request per section.
    reload_requests: Mutex<BTreeMap<SectionId, bool>>,
    signals: ProviderSignals,
}

impl ProviderObserver {
    fn take_reload_requests(&self) -> BTreeMap<SectionId, bool> {
        std::mem::take(&mut *self.reload_requests.lock())
    }
}

impl SectionObserver for ProviderObserver {
    fn did_update_rows(&self, section: &Section) {
        self.signals.rows_updated.emit(section.id());
    }

    fn section_needs_reload(&self, section: &Section, needs_reload: bool) {
        let mut requests = self.reload_requests.lock();
        if needs_reload {
            requests.insert(section.id(), true);
        } else {
            requests.remove(&section.id());
        }
        drop(requests);
        self.signals
            .reload_requested
            .emit((section.id(), needs_reload));
    }
}

/// Owns an ordered list of sections and flushes their changes as batches.
pub struct DataProvider {
    sections: Vec<Section>,
    observer: Arc<ProviderObserver>,
    config: ProviderConfig,
}

impl Default for DataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider {
    /// Creates an empty provider with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProviderConfig::default())
    }

    /// Creates an empty provider with `config`.
    pub fn with_config(config: ProviderConfig) -> Self {
        let observer = Arc::new(ProviderObserver {
            reload_requests: Mutex::new(BTreeMap::new()),
            signals: ProviderSignals::new(),
        });
        observer.signals.set_blocked(!config.emit_signals);
        Self {
            sections: Vec::new(),
            observer,
            config,
        }
    }

    /// Returns the provider's configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns the signals views connect to.
    pub fn signals(&self) -> &ProviderSignals {
        &self.observer.signals
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns all sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the section at `index`.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Returns the section at `index` for mutation.
    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    /// Returns the current index of the section with `id`.
    pub fn index_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|section| section.id() == id)
    }

    /// Appends `section`, observing it, and returns its index.
    pub fn push_section(&mut self, mut section: Section) -> usize {
        section.set_observer(&self.observer);
        self.sections.push(section);
        self.observer.signals.sections_changed.emit(());
        self.sections.len() - 1
    }

    /// Inserts `section` at `index`, shifting later sections.
    pub fn insert_section(&mut self, index: usize, mut section: Section) -> Result<()> {
        if index > self.sections.len() {
            return Err(Error::section_out_of_bounds(index, self.sections.len()));
        }
        section.set_observer(&self.observer);
        self.sections.insert(index, section);
        self.observer.signals.sections_changed.emit(());
        Ok(())
    }

    /// Removes and returns the section at `index`.
    ///
    /// The returned section is no longer observed and any reload request it
    /// made is dropped. Its ledger is left as is.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        if index >= self.sections.len() {
            return Err(Error::section_out_of_bounds(index, self.sections.len()));
        }
        let mut section = self.sections.remove(index);
        section.clear_observer();
        self.observer.reload_requests.lock().remove(&section.id());
        self.observer.signals.sections_changed.emit(());
        Ok(section)
    }

    // -------------------------------------------------------------------------
    // Flushing
    // -------------------------------------------------------------------------

    /// Returns `true` if a flush would produce a batch.
    pub fn has_pending_updates(&self) -> bool {
        !self.observer.reload_requests.lock().is_empty()
            || self.sections.iter().any(Section::has_pending_changes)
    }

    /// Exports and clears every pending section.
    ///
    /// Sections that requested a wholesale reload are reported in
    /// [`DiffBatch::reload_sections`] instead of incrementally, as are
    /// sections whose diff exceeds the configured full reload threshold.
    /// Every exported section's ledger is cleared.
    ///
    /// Emits [`ProviderSignals::diff_ready`] and returns the batch, or returns
    /// `None` when nothing changed since the last flush.
    pub fn flush(&mut self) -> Option<DiffBatch> {
        let _span = PerfSpan::new(span_names::FLUSH);
        let reload_requests = self.observer.take_reload_requests();
        let mut batch = DiffBatch::new();

        for (index, section) in self.sections.iter_mut().enumerate() {
            if reload_requests.get(&section.id()).copied().unwrap_or(false) {
                tracing::debug!(
                    target: targets::PROVIDER,
                    section = index,
                    "section requested reload"
                );
                batch.request_reload(index);
                section.clear();
                continue;
            }

            let Some(diff) = section.diff_positions(index) else {
                continue;
            };
            section.clear();

            match self.config.threshold() {
                Some(threshold) if diff.len() > threshold => {
                    tracing::debug!(
                        target: targets::PROVIDER,
                        section = index,
                        changes = diff.len(),
                        threshold,
                        "diff exceeds threshold, escalating to reload"
                    );
                    batch.request_reload(index);
                }
                _ => batch.insert_diff(index, diff),
            }
        }

        if batch.is_empty() {
            tracing::trace!(target: targets::PROVIDER, "flush: nothing to report");
            return None;
        }

        tracing::debug!(
            target: targets::PROVIDER,
            sections = batch.diffs().count(),
            reloads = batch.reload_sections().len(),
            "flushed diff batch"
        );
        self.observer.signals.diff_ready.emit(batch.clone());
        Some(batch)
    }
}

impl std::fmt::Debug for DataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataProvider")
            .field("sections", &self.sections)
            .field("config", &self.config)
            .finish()
    }
}

static_assertions::assert_impl_all!(DataProvider: Send, Sync);
