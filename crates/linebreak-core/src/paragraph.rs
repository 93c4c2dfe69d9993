//! Paragraph character buffers.
//!
//! A [`Paragraph`] is an immutable run of characters plus a **base offset** (`begin`) that maps
//! array index `0` to an external logical offset. All public offsets are character offsets
//! (Unicode scalar values), never byte offsets.
//!
//! Edits never mutate a paragraph in place: [`Paragraph::with_inserted`] and
//! [`Paragraph::with_deleted`] build a new buffer that replaces the old one wholesale.

use std::sync::Arc;

use crate::error::{MeasureError, Result};

/// An immutable character buffer anchored at an external base offset.
///
/// Invariant: `end_index() == begin_index() + len()`, and `end_index()` never exceeds
/// `usize::MAX`: a base offset too large for the buffer is lowered until the end fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    chars: Arc<[char]>,
    begin: usize,
}

impl Paragraph {
    /// Create a paragraph starting at offset `0`.
    pub fn new(text: &str) -> Self {
        Self::with_begin(text, 0)
    }

    /// Create a paragraph whose first character sits at external offset `begin`.
    ///
    /// `begin` is clamped to `usize::MAX - len`.
    pub fn with_begin(text: &str, begin: usize) -> Self {
        Self::from_chars(text.chars().collect::<Vec<_>>(), begin)
    }

    /// Create a paragraph from an existing character buffer.
    ///
    /// `begin` is clamped to `usize::MAX - len`.
    pub fn from_chars(chars: impl Into<Arc<[char]>>, begin: usize) -> Self {
        let chars = chars.into();
        Self {
            begin: clamp_begin(begin, chars.len()),
            chars,
        }
    }

    /// External offset of the first character.
    pub fn begin_index(&self) -> usize {
        self.begin
    }

    /// External offset one past the last character.
    pub fn end_index(&self) -> usize {
        self.begin + self.chars.len()
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the paragraph has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Shared backing buffer.
    pub fn chars(&self) -> &Arc<[char]> {
        &self.chars
    }

    /// Character at the external offset `offset`, if it lies inside the paragraph.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        let index = offset.checked_sub(self.begin)?;
        self.chars.get(index).copied()
    }

    /// Text of the half-open external range `[from, to)`, clamped to the paragraph.
    pub fn slice(&self, from: usize, to: usize) -> String {
        let from = from.clamp(self.begin, self.end_index()) - self.begin;
        let to = to.clamp(self.begin, self.end_index()) - self.begin;
        if from >= to {
            return String::new();
        }
        self.chars[from..to].iter().collect()
    }

    /// Whole paragraph text.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Build the paragraph that results from inserting `ch` at external offset `offset`.
    ///
    /// `offset` may be anywhere in `begin..=end` (inserting at `end` appends).
    pub fn with_inserted(&self, offset: usize, ch: char) -> Result<Self> {
        if offset < self.begin || offset > self.end_index() {
            return Err(MeasureError::EditOutOfRange {
                offset,
                begin: self.begin,
                end: self.end_index(),
            });
        }

        let index = offset - self.begin;
        let mut chars = Vec::with_capacity(self.chars.len() + 1);
        chars.extend_from_slice(&self.chars[..index]);
        chars.push(ch);
        chars.extend_from_slice(&self.chars[index..]);
        Ok(Self::from_chars(chars, self.begin))
    }

    /// Build the paragraph that results from deleting the character at external offset `offset`.
    pub fn with_deleted(&self, offset: usize) -> Result<Self> {
        if offset < self.begin || offset >= self.end_index() {
            return Err(MeasureError::EditOutOfRange {
                offset,
                begin: self.begin,
                end: self.end_index(),
            });
        }

        let index = offset - self.begin;
        let mut chars = Vec::with_capacity(self.chars.len() - 1);
        chars.extend_from_slice(&self.chars[..index]);
        chars.extend_from_slice(&self.chars[index + 1..]);
        Ok(Self::from_chars(chars, self.begin))
    }
}

/// Largest base offset `<= begin` for which `begin + len` does not overflow.
pub(crate) fn clamp_begin(begin: usize, len: usize) -> usize {
    begin.min(usize::MAX - len)
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_base_offset() {
        let p = Paragraph::with_begin("héllo", 10);
        assert_eq!(p.begin_index(), 10);
        assert_eq!(p.end_index(), 15);
        assert_eq!(p.len(), 5);
        assert_eq!(p.char_at(11), Some('é'));
        assert_eq!(p.char_at(9), None);
        assert_eq!(p.char_at(15), None);
    }

    #[test]
    fn test_slice_clamps_to_paragraph() {
        let p = Paragraph::with_begin("abcdef", 2);
        assert_eq!(p.slice(3, 5), "bc");
        assert_eq!(p.slice(0, 100), "abcdef");
        assert_eq!(p.slice(5, 3), "");
    }

    #[test]
    fn test_insert_and_delete_build_new_buffers() {
        let p = Paragraph::with_begin("abc", 4);
        let inserted = p.with_inserted(5, 'X').unwrap();
        assert_eq!(inserted.text(), "aXbc");
        assert_eq!(inserted.begin_index(), 4);
        assert_eq!(p.text(), "abc");

        let appended = p.with_inserted(7, '!').unwrap();
        assert_eq!(appended.text(), "abc!");

        let deleted = inserted.with_deleted(4).unwrap();
        assert_eq!(deleted.text(), "Xbc");
    }

    #[test]
    fn test_edit_offsets_are_validated() {
        let p = Paragraph::with_begin("abc", 4);
        assert_eq!(
            p.with_inserted(3, 'x'),
            Err(MeasureError::EditOutOfRange {
                offset: 3,
                begin: 4,
                end: 7
            })
        );
        assert!(p.with_inserted(8, 'x').is_err());
        assert!(p.with_deleted(7).is_err());
    }

    #[test]
    fn test_base_offset_is_clamped_at_usize_max() {
        let p = Paragraph::with_begin("ab", usize::MAX - 1);
        assert_eq!(p.begin_index(), usize::MAX - 2);
        assert_eq!(p.end_index(), usize::MAX);
        assert_eq!(p.char_at(usize::MAX - 1), Some('b'));

        let p = Paragraph::from_chars(vec!['x'; 3], usize::MAX);
        assert_eq!(p.end_index(), usize::MAX);
        assert_eq!(p.text(), "xxx");

        let fits = Paragraph::with_begin("ab", usize::MAX - 2);
        assert_eq!(fits.begin_index(), usize::MAX - 2);
    }
}
