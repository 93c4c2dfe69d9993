#![warn(missing_docs)]
//! Linebreak Core - Incremental Paragraph Line Breaking
//!
//! # Overview
//!
//! `linebreak-core` exposes a paragraph of text incrementally as a sequence of line-sized
//! segments that fit within a caller-supplied visual width. Callers repeatedly ask for "as much
//! text as fits in width W, starting where we left off" and receive both the break offset and a
//! renderable segment. Single-character edits are absorbed without re-measuring the paragraph.
//!
//! It does not shape glyphs, resolve fonts, reorder bidirectional text or paint anything; those
//! concerns live behind the [`TextMeasurer`] trait.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  LineBreakMeasurer (break policy, cursor)   │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  TextMeasurer        │  BreakClassifier     │  ← Collaborators
//! │  (advance / layout)  │  (UAX #14 / #29)     │
//! ├──────────────────────┴──────────────────────┤
//! │  CharWindow (shared character cursor)       │  ← Text Source
//! ├─────────────────────────────────────────────┤
//! │  Paragraph (immutable character buffer)     │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use linebreak_core::{CellTextMeasurer, LineBreakMeasurer, Paragraph};
//!
//! let paragraph = Paragraph::new("The quick fox");
//! let measurer = CellTextMeasurer::new(&paragraph);
//! let mut lbm = LineBreakMeasurer::new(&paragraph, measurer).unwrap();
//!
//! // "The qui" fits in 7 cells, but the break moves back to the start of "quick".
//! assert_eq!(lbm.next_offset(7.0), 4);
//!
//! let line = lbm.next_layout(7.0).unwrap();
//! assert_eq!(line.text, "The ");
//! assert_eq!(lbm.position(), 4);
//! ```
//!
//! ## Incremental edits
//!
//! ```rust
//! use linebreak_core::{CellTextMeasurer, LineBreakMeasurer, Paragraph};
//!
//! let paragraph = Paragraph::new("aa bb");
//! let mut lbm = LineBreakMeasurer::new(&paragraph, CellTextMeasurer::new(&paragraph)).unwrap();
//! lbm.next_layout(3.0);
//!
//! let edited = paragraph.with_inserted(1, 'x').unwrap();
//! lbm.insert_char(&edited, 1).unwrap();
//! assert_eq!(lbm.position(), 0);
//! assert_eq!(lbm.next_layout(4.0).unwrap().text, "axa ");
//! ```
//!
//! # Module Description
//!
//! - [`paragraph`] - Immutable character buffers anchored at a base offset
//! - [`char_window`] - Bidirectional character cursor over a shared buffer
//! - [`classifier`] - Break boundary classification
//! - [`metrics`] - UAX #11 cell widths and tab stops
//! - [`text_measurer`] - Advance measurement and segment layout
//! - [`line_break_measurer`] - The line breaking state machine
//!
//! # Concurrency
//!
//! A measurer is single-threaded state: [`LineBreakMeasurer::next_layout`] moves its position
//! and edits replace its buffers. Independent cursors over the same text are obtained by cloning
//! a [`CharWindow`], which shares the character buffer and copies only the position.

pub mod char_window;
pub mod classifier;
pub mod error;
pub mod line_break_measurer;
pub mod metrics;
pub mod paragraph;
pub mod text_measurer;

pub use char_window::CharWindow;
pub use classifier::{BoundaryClassifier, BreakClassifier, BreakRules};
pub use error::{MeasureError, Result};
pub use line_break_measurer::{Layouts, LineBreakMeasurer};
pub use metrics::{CellMetrics, DEFAULT_TAB_WIDTH};
pub use paragraph::Paragraph;
pub use text_measurer::{CellTextMeasurer, TextLine, TextMeasurer};
