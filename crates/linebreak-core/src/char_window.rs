//! Bidirectional character cursor.
//!
//! [`CharWindow`] walks a shared, read-only character buffer. Positions handed in and out of the
//! window are **external** offsets (shifted by the window's base offset); internally the cursor
//! keeps a 0-based array index in `0..=len`, where `len` means "one past the end".
//!
//! Running off either end is not an error: cursor moves return `None` instead of a sentinel
//! character.
//!
//! Cloning a window is cheap: the backing buffer is shared, the position is copied.

use std::sync::Arc;

use crate::error::{MeasureError, Result};
use crate::paragraph::clamp_begin;

/// A mutable cursor over a shared character buffer.
#[derive(Debug, Clone)]
pub struct CharWindow {
    chars: Arc<[char]>,
    begin: usize,
    pos: usize,
}

impl CharWindow {
    /// Create a window over `chars` whose first character sits at external offset `begin`.
    ///
    /// `begin` is clamped to `usize::MAX - len` so that `end_index()` cannot overflow.
    pub fn new(chars: Arc<[char]>, begin: usize) -> Self {
        Self {
            begin: clamp_begin(begin, chars.len()),
            chars,
            pos: 0,
        }
    }

    /// Create an empty window anchored at offset `0`.
    pub fn empty() -> Self {
        Self::new(Arc::from(Vec::new()), 0)
    }

    /// Move to the first character and return it.
    pub fn first(&mut self) -> Option<char> {
        self.pos = 0;
        self.current()
    }

    /// Move to the last character and return it.
    pub fn last(&mut self) -> Option<char> {
        self.pos = self.chars.len().saturating_sub(1);
        self.current()
    }

    /// Character at the cursor, or `None` if the cursor is outside the buffer.
    pub fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Advance one character.
    ///
    /// At the last character (or beyond) the cursor is pinned one past the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        if self.pos + 1 < self.chars.len() {
            self.pos += 1;
            self.current()
        } else {
            self.pos = self.chars.len();
            None
        }
    }

    /// Step back one character. At the first character the cursor is pinned to the start.
    pub fn previous(&mut self) -> Option<char> {
        if self.pos > 0 {
            self.pos -= 1;
            self.current()
        } else {
            self.pos = 0;
            None
        }
    }

    /// Move to the external offset `position` and return the character there.
    ///
    /// `position` may be anywhere in `begin_index()..=end_index()`; `end_index()` places the
    /// cursor one past the end and yields `None`.
    pub fn set_index(&mut self, position: usize) -> Result<Option<char>> {
        let index = position
            .checked_sub(self.begin)
            .filter(|&index| index <= self.chars.len())
            .ok_or(MeasureError::IndexOutOfRange {
                index: position,
                begin: self.begin,
                end: self.end_index(),
            })?;

        self.pos = index;
        Ok(self.current())
    }

    /// External offset of the first character.
    pub fn begin_index(&self) -> usize {
        self.begin
    }

    /// External offset one past the last character.
    pub fn end_index(&self) -> usize {
        self.begin + self.chars.len()
    }

    /// External offset of the cursor.
    pub fn index(&self) -> usize {
        self.begin + self.pos
    }

    /// Number of characters in the window.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the window has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at the external offset `position` without moving the cursor.
    pub fn char_at(&self, position: usize) -> Option<char> {
        let index = position.checked_sub(self.begin)?;
        self.chars.get(index).copied()
    }

    /// Replace the backing buffer and base offset, moving the cursor to the start.
    pub fn reset(&mut self, chars: Arc<[char]>, begin: usize) {
        self.begin = clamp_begin(begin, chars.len());
        self.chars = chars;
        self.pos = 0;
    }

    /// Returns `true` if both windows read the same backing buffer.
    pub fn shares_buffer_with(&self, other: &CharWindow) -> bool {
        Arc::ptr_eq(&self.chars, &other.chars)
    }
}

impl Default for CharWindow {
    fn default() -> Self {
        Self::empty()
    }
}
