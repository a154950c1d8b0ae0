//! Integration tests for section change tracking, driven through the public API.

use std::sync::Arc;

use parking_lot::Mutex;
use tabula::model::{DataProvider, IndexPath, Row, Section, SectionDiff, SectionObserver};

/// A view-side coordinator that records what it was told.
#[derive(Default)]
struct RecordingView {
    updates: Mutex<usize>,
    reloads: Mutex<Vec<bool>>,
}

impl SectionObserver for RecordingView {
    fn did_update_rows(&self, _section: &Section) {
        *self.updates.lock() += 1;
    }

    fn section_needs_reload(&self, _section: &Section, needs_reload: bool) {
        self.reloads.lock().push(needs_reload);
    }
}

fn letters(section: &Section) -> Vec<&'static str> {
    section.contents::<&'static str>().copied().collect()
}

#[test]
fn add_add_insert_merges_insert_positions() {
    let mut section = Section::new();
    section.add("a");
    section.add("b");
    section.insert("c", 0);

    assert_eq!(letters(&section), vec!["c", "a", "b"]);

    let changes = section.ledger().export().unwrap();
    assert_eq!(changes.insert, Some(vec![0, 1]));
    assert_eq!(changes.delete, None);
    assert_eq!(changes.reload, None);
}

#[test]
fn delete_records_former_position() {
    let mut section = Section::with_rows(vec![Row::new("a"), Row::new("b"), Row::new("c")]);
    section.delete(&"a");

    assert_eq!(letters(&section), vec!["b", "c"]);
    assert_eq!(section.ledger().export().unwrap().delete, Some(vec![0]));
    assert!(section.content::<&str, _>(|s| *s == "a").is_none());
}

#[test]
fn reload_then_clear_reports_nothing() {
    let mut section = Section::new();
    section.reload_at(2);
    section.clear();

    assert!(section.ledger().export().is_none());
    assert!(section.diff_positions(0).is_none());
}

#[test]
fn diff_positions_scopes_to_section_index() {
    let mut section = Section::with_rows(vec![Row::new(10u32), Row::new(20u32)]);
    section.insert(5u32, 0);
    section.delete(&10u32);

    assert_eq!(
        section.diff_positions(3),
        Some(SectionDiff {
            reload: None,
            delete: Some(vec![IndexPath::new(3, 1)]),
            insert: Some(vec![IndexPath::new(3, 0)]),
        })
    );
}

#[test]
fn content_never_returns_mismatched_type() {
    let mut section = Section::new();
    section.add(String::from("7"));
    section.add(7u64);

    assert!(section.content::<u32, _>(|_| true).is_none());
    assert_eq!(section.content::<u64, _>(|n| *n == 7), Some(&7));
    assert_eq!(
        section.content::<String, _>(|s| s == "7").map(String::as_str),
        Some("7")
    );
}

#[test]
fn observer_sees_each_mutation_once() {
    let view = Arc::new(RecordingView::default());
    let mut section = Section::new().with_header("Inbox");
    section.set_observer(&view);

    section.add(1u8);
    section.insert(0u8, 0);
    section.delete(&1u8);
    section.delete(&42u8);
    section.reload(&0u8);
    section.set_needs_update(true);

    assert_eq!(*view.updates.lock(), 3);
    assert_eq!(*view.reloads.lock(), vec![true]);
}

#[test]
fn view_applies_and_clears_each_batch() {
    let view = Arc::new(RecordingView::default());
    let mut section = Section::new();
    section.set_observer(&view);

    section.add("first");
    let first = section.diff_positions(0).unwrap();
    assert_eq!(first.insert, Some(vec![IndexPath::new(0, 0)]));
    section.clear();

    section.add("second");
    let second = section.diff_positions(0).unwrap();
    assert_eq!(second.insert, Some(vec![IndexPath::new(0, 1)]));
    section.clear();

    assert!(section.diff_positions(0).is_none());
    assert_eq!(*view.updates.lock(), 2);
}

#[test]
fn provider_round_trip() {
    let mut provider = DataProvider::new();
    provider.push_section(Section::new().with_header("Favorites"));
    provider.push_section(Section::with_rows(vec![Row::new("x"), Row::new("y")]));

    let batches = Arc::new(Mutex::new(Vec::new()));
    let recv = batches.clone();
    provider.signals().diff_ready.connect(move |batch| {
        recv.lock().push(batch.clone());
    });

    provider.section_mut(0).unwrap().add("star");
    provider.section_mut(1).unwrap().delete(&"x");
    provider.section_mut(1).unwrap().reload(&"y");

    let batch = provider.flush().unwrap();
    assert_eq!(batch.insert_paths(), vec![IndexPath::new(0, 0)]);
    assert_eq!(batch.delete_paths(), vec![IndexPath::new(1, 0)]);
    // Recorded against the post-delete sequence; not renumbered
    assert_eq!(batch.reload_paths(), vec![IndexPath::new(1, 0)]);
    assert_eq!(batches.lock().len(), 1);

    assert!(provider.flush().is_none());
    assert_eq!(batches.lock().len(), 1);
}

#[test]
fn diff_batch_serializes_to_json() {
    let mut provider = DataProvider::new();
    provider.push_section(Section::new());
    provider.section_mut(0).unwrap().add("row");

    let batch = provider.flush().unwrap();
    let json = serde_json::to_string(&batch).unwrap();
    let back: tabula::model::DiffBatch = serde_json::from_str(&json).unwrap();
    assert_eq!(back, batch);
}
