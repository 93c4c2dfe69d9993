//! Cell metrics.
//!
//! Character advances for the built-in [`CellTextMeasurer`](crate::CellTextMeasurer), computed
//! from UAX #11 East Asian Width. Advances are expressed in cells and scaled to caller units by
//! [`CellMetrics::cell_advance`].

use unicode_width::UnicodeWidthChar;

/// Default tab width (in cells) used when a caller does not specify a tab width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Configuration for cell-based measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Distance (in cells) between tab stops. Always at least 1.
    pub tab_width: usize,
    /// Visual advance of one narrow cell, in caller units.
    pub cell_advance: f32,
}

impl CellMetrics {
    /// Metrics with the given tab width and a cell advance of `1.0`.
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
            cell_advance: 1.0,
        }
    }

    /// Set the tab width (in cells).
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// Set the advance of one narrow cell.
    pub fn with_cell_advance(mut self, cell_advance: f32) -> Self {
        self.cell_advance = cell_advance;
        self
    }

    /// Convert a cell count into caller units.
    pub fn advance_of(&self, cells: usize) -> f32 {
        cells as f32 * self.cell_advance
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

/// Calculate visual width of a character (based on UAX #11)
///
/// Return value:
/// - 1: Narrow character (ASCII, etc.)
/// - 2: Wide character (CJK, fullwidth, etc.)
/// - 0: Zero-width character (combining characters, etc.)
///
/// Control characters without a defined width count as one cell.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Width (in cells) of `ch` when it starts `x` cells into a segment.
///
/// `'\t'` advances to the next tab stop; everything else follows [`char_width`].
pub fn cell_width_at(ch: char, x: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - x % tab_width
    } else {
        char_width(ch)
    }
}

/// Whitespace as seen by the break policy.
///
/// Unicode whitespace, except the no-break spaces (U+00A0, U+2007, U+202F), which glue words
/// together.
pub fn is_break_whitespace(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}
