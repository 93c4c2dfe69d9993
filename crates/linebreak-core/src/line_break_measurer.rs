//! Line break measurement.
//!
//! [`LineBreakMeasurer`] hands out a paragraph one segment at a time: each request asks for "as
//! much text as fits in this width, starting where the previous segment ended". The measurer
//! combines a [`TextMeasurer`] (how far does the text reach within the width?) with a
//! [`BreakClassifier`] (where may a line legally end?) and applies a fixed tie-break policy:
//!
//! - If the rest of the paragraph fits, take all of it.
//! - If the fit point lands on whitespace, move *forward* to the next boundary so the whitespace
//!   run stays on the current line.
//! - Otherwise the fit point is inside a word: move *backward* to the last boundary before it.
//!   If that would produce an empty segment, either report "nothing fits"
//!   (`require_next_word`) or force progress with at least one character.
//!
//! The paragraph may be edited one character at a time via [`LineBreakMeasurer::insert_char`]
//! and [`LineBreakMeasurer::delete_char`]; the text measurer patches its own data and the
//! position returns to the paragraph start.
//!
//! # Example
//!
//! ```rust
//! use linebreak_core::{CellTextMeasurer, LineBreakMeasurer, Paragraph};
//!
//! let paragraph = Paragraph::new("The quick brown fox");
//! let mut lbm = LineBreakMeasurer::new(&paragraph, CellTextMeasurer::new(&paragraph)).unwrap();
//!
//! let lines: Vec<String> = lbm.layouts(10.0).map(|line| line.text).collect();
//! assert_eq!(lines, vec!["The quick ", "brown fox"]);
//! ```

use crate::char_window::CharWindow;
use crate::classifier::{BoundaryClassifier, BreakClassifier};
use crate::error::{MeasureError, Result};
use crate::metrics::is_break_whitespace;
use crate::paragraph::Paragraph;
use crate::text_measurer::TextMeasurer;

/// Incremental line breaker over a single paragraph.
///
/// Invariant: `start <= pos <= limit`, where `start`/`limit` are the paragraph's begin and end
/// index. Only `pos` changes between segment requests.
#[derive(Debug)]
pub struct LineBreakMeasurer<M, C = BoundaryClassifier> {
    measurer: M,
    classifier: C,
    /// Text source shared with `classifier`, anchored at `start`.
    window: CharWindow,
    start: usize,
    pos: usize,
    limit: usize,
}

impl<M: TextMeasurer> LineBreakMeasurer<M> {
    /// Create a measurer using UAX #14 line break opportunities.
    pub fn new(paragraph: &Paragraph, measurer: M) -> Result<Self> {
        Self::with_classifier(paragraph, BoundaryClassifier::line(), measurer)
    }
}

impl<M: TextMeasurer, C: BreakClassifier> LineBreakMeasurer<M, C> {
    /// Create a measurer using `classifier` to find break boundaries.
    ///
    /// Fails with [`MeasureError::EmptyParagraph`] if `paragraph` has no characters.
    pub fn with_classifier(paragraph: &Paragraph, mut classifier: C, measurer: M) -> Result<Self> {
        if paragraph.is_empty() {
            return Err(MeasureError::EmptyParagraph);
        }

        let start = paragraph.begin_index();
        let window = CharWindow::new(measurer.characters(), start);
        classifier.set_text(window.clone());

        Ok(Self {
            measurer,
            classifier,
            window,
            start,
            pos: start,
            limit: paragraph.end_index(),
        })
    }

    /// Offset at which the next segment would end, for the whole remaining paragraph.
    ///
    /// Does not move the current position.
    pub fn next_offset(&mut self, wrapping_width: f32) -> usize {
        self.compute_next_offset(wrapping_width, self.limit, false)
    }

    /// Offset at which the next segment would end.
    ///
    /// - `offset_limit`: the segment never extends past this offset (e.g. a tab stop or style
    ///   run). Must be after the current position unless the paragraph is exhausted.
    /// - `require_next_word`: if `true` and not even the first word fits, returns the current
    ///   position instead of splitting the word.
    ///
    /// Does not move the current position.
    pub fn next_offset_with(
        &mut self,
        wrapping_width: f32,
        offset_limit: usize,
        require_next_word: bool,
    ) -> Result<usize> {
        if self.pos < self.limit && offset_limit <= self.pos {
            return Err(MeasureError::OffsetLimitNotAfterPosition {
                offset_limit,
                position: self.pos,
            });
        }
        Ok(self.compute_next_offset(wrapping_width, offset_limit, require_next_word))
    }

    /// Next segment fitting in `wrapping_width`, advancing the position past it.
    ///
    /// Returns `None` once the paragraph is exhausted.
    pub fn next_layout(&mut self, wrapping_width: f32) -> Option<M::Segment> {
        let limit = self.limit;
        self.take_segment(wrapping_width, limit, false)
    }

    /// Next segment, honoring `offset_limit` and `require_next_word` as in
    /// [`next_offset_with`](Self::next_offset_with).
    ///
    /// Returns `Ok(None)` if the paragraph is exhausted, or if `require_next_word` is set and the
    /// next word does not fit; the position is unchanged in both cases.
    pub fn next_layout_with(
        &mut self,
        wrapping_width: f32,
        offset_limit: usize,
        require_next_word: bool,
    ) -> Result<Option<M::Segment>> {
        if self.pos >= self.limit {
            return Ok(None);
        }
        if offset_limit <= self.pos {
            return Err(MeasureError::OffsetLimitNotAfterPosition {
                offset_limit,
                position: self.pos,
            });
        }
        Ok(self.take_segment(wrapping_width, offset_limit, require_next_word))
    }

    /// Iterate over the remaining segments of the paragraph at a fixed width.
    pub fn layouts(&mut self, wrapping_width: f32) -> Layouts<'_, M, C> {
        Layouts {
            measurer: self,
            wrapping_width,
        }
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the current position. `position` must lie within the paragraph.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position < self.start || position > self.limit {
            return Err(MeasureError::PositionOutOfRange {
                position,
                start: self.start,
                limit: self.limit,
            });
        }
        self.pos = position;
        Ok(())
    }

    /// Begin index of the paragraph.
    pub fn paragraph_start(&self) -> usize {
        self.start
    }

    /// End index of the paragraph.
    pub fn paragraph_limit(&self) -> usize {
        self.limit
    }

    /// The text measurer.
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// The break classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Update after a single character was inserted into the paragraph.
    ///
    /// `paragraph` is the paragraph *after* the insertion and `insert_pos` the offset of the new
    /// character. The position returns to the paragraph start.
    pub fn insert_char(&mut self, paragraph: &Paragraph, insert_pos: usize) -> Result<()> {
        check_edit(paragraph, insert_pos, false)?;
        self.measurer.insert_char(paragraph, insert_pos);
        self.reset_paragraph(paragraph);
        tracing::debug!(
            insert_pos,
            start = self.start,
            limit = self.limit,
            "paragraph reset after insert"
        );
        Ok(())
    }

    /// Update after a single character was deleted from the paragraph.
    ///
    /// `paragraph` is the paragraph *after* the deletion and `delete_pos` the offset the removed
    /// character occupied. The position returns to the paragraph start.
    pub fn delete_char(&mut self, paragraph: &Paragraph, delete_pos: usize) -> Result<()> {
        check_edit(paragraph, delete_pos, true)?;
        self.measurer.delete_char(paragraph, delete_pos);
        self.reset_paragraph(paragraph);
        tracing::debug!(
            delete_pos,
            start = self.start,
            limit = self.limit,
            "paragraph reset after delete"
        );
        Ok(())
    }

    fn reset_paragraph(&mut self, paragraph: &Paragraph) {
        self.limit = paragraph.end_index();
        self.start = paragraph.begin_index();
        self.pos = self.start;

        self.window.reset(self.measurer.characters(), self.start);
        self.classifier.set_text(self.window.clone());
    }

    fn take_segment(
        &mut self,
        wrapping_width: f32,
        offset_limit: usize,
        require_next_word: bool,
    ) -> Option<M::Segment> {
        if self.pos >= self.limit {
            return None;
        }

        let layout_limit =
            self.compute_next_offset(wrapping_width, offset_limit, require_next_word);
        if layout_limit == self.pos {
            return None;
        }

        let segment = self.measurer.layout(self.pos, layout_limit);
        self.pos = layout_limit;
        Some(segment)
    }

    fn compute_next_offset(
        &mut self,
        wrapping_width: f32,
        offset_limit: usize,
        require_next_word: bool,
    ) -> usize {
        let pos = self.pos;
        if pos >= self.limit {
            return pos;
        }

        let char_at_max_advance = self.measurer.line_break_index(pos, wrapping_width);

        let mut next_offset = if char_at_max_advance >= self.limit {
            self.limit
        } else if self
            .window
            .char_at(char_at_max_advance)
            .is_some_and(is_break_whitespace)
        {
            // Keep the whitespace run on this line.
            self.classifier
                .following(char_at_max_advance)
                .unwrap_or(self.limit)
        } else {
            let test_pos = char_at_max_advance + 1;
            let boundary = if test_pos == self.limit {
                self.classifier.last();
                self.classifier.previous()
            } else {
                self.classifier.preceding(test_pos)
            }
            .unwrap_or(self.start);

            if boundary > pos {
                boundary
            } else if require_next_word {
                pos
            } else {
                (pos + 1).max(char_at_max_advance)
            }
        };

        if next_offset > offset_limit {
            next_offset = offset_limit;
        }

        tracing::trace!(
            pos,
            char_at_max_advance,
            offset_limit,
            require_next_word,
            next_offset,
            "computed next offset"
        );
        next_offset
    }
}

/// `offset` must lie in `begin..end`, or `begin..=end` when `end_inclusive` is set.
fn check_edit(paragraph: &Paragraph, offset: usize, end_inclusive: bool) -> Result<()> {
    if paragraph.is_empty() {
        return Err(MeasureError::EmptyParagraph);
    }
    let end = paragraph.end_index();
    let past_end = offset > end || (offset == end && !end_inclusive);
    if offset < paragraph.begin_index() || past_end {
        return Err(MeasureError::EditOutOfRange {
            offset,
            begin: paragraph.begin_index(),
            end,
        });
    }
    Ok(())
}

/// Iterator returned by [`LineBreakMeasurer::layouts`].
#[derive(Debug)]
pub struct Layouts<'a, M, C> {
    measurer: &'a mut LineBreakMeasurer<M, C>,
    wrapping_width: f32,
}

impl<M: TextMeasurer, C: BreakClassifier> Iterator for Layouts<'_, M, C> {
    type Item = M::Segment;

    fn next(&mut self) -> Option<Self::Item> {
        self.measurer.next_layout(self.wrapping_width)
    }
}
