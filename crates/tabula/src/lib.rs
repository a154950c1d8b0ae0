//! Tabula - sectioned list models with position-based change tracking.
//!
//! A list or table surface is split into sections. Each [`Section`](model::Section)
//! owns its rows and records which positions were inserted, deleted or need a
//! reload; a coordinator exports those positions as diffs and applies them to
//! the live view. Rendering is left to the view layer.
//!
//! # Example
//!
//! ```
//! use tabula::model::{DataProvider, IndexPath, Section};
//!
//! let mut provider = DataProvider::new();
//! provider.push_section(Section::new().with_header("Fruits"));
//!
//! provider.signals().diff_ready.connect(|batch| {
//!     for path in batch.insert_paths() {
//!         println!("insert row at {}", path);
//!     }
//! });
//!
//! let fruits = provider.section_mut(0).unwrap();
//! fruits.add("Apple");
//! fruits.add("Banana");
//!
//! let batch = provider.flush().unwrap();
//! assert_eq!(batch.insert_paths(), vec![IndexPath::new(0, 0), IndexPath::new(0, 1)]);
//! ```

pub use tabula_core::*;

pub mod config;
pub mod model;
pub mod prelude;
pub mod text;
