//! Text measurement.
//!
//! A [`TextMeasurer`] owns the measured character data of one paragraph. It answers "how far can
//! a segment starting here extend within this width?" and turns offset ranges into renderable
//! segments. It is told about single-character edits so it can patch its cached data instead of
//! re-measuring the paragraph.
//!
//! [`CellTextMeasurer`] is the built-in measurer: a monospace cell model based on UAX #11 widths
//! with tab stops, producing [`TextLine`] segments.

use std::ops::Range;
use std::sync::Arc;

use crate::metrics::{CellMetrics, cell_width_at, char_width, is_break_whitespace};
use crate::paragraph::Paragraph;

/// Measurement collaborator driven by [`LineBreakMeasurer`](crate::LineBreakMeasurer).
///
/// Offsets are external paragraph offsets. Callers only pass offsets inside the current
/// paragraph (`begin..=end`).
pub trait TextMeasurer {
    /// The renderable segment produced by [`layout`](Self::layout).
    type Segment;

    /// Character data of the current paragraph.
    fn characters(&self) -> Arc<[char]>;

    /// Largest offset `o` such that the advance of `[start, o)` does not exceed `max_advance`.
    ///
    /// Returns the paragraph end if the rest of the paragraph fits, and `start` if not even the
    /// first character fits. A NaN `max_advance` fits nothing.
    fn line_break_index(&mut self, start: usize, max_advance: f32) -> usize;

    /// Produce the segment covering `[start, limit)`.
    fn layout(&mut self, start: usize, limit: usize) -> Self::Segment;

    /// Update after `paragraph` gained one character at `insert_pos`.
    fn insert_char(&mut self, paragraph: &Paragraph, insert_pos: usize);

    /// Update after `paragraph` lost the character previously at `delete_pos`.
    fn delete_char(&mut self, paragraph: &Paragraph, delete_pos: usize);
}

/// A measured segment of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub limit: usize,
    /// Segment text.
    pub text: String,
    /// Total advance, including trailing whitespace.
    pub advance: f32,
    /// Advance up to the last non-whitespace character.
    pub visible_advance: f32,
}

impl TextLine {
    /// Number of characters in the segment.
    pub fn len(&self) -> usize {
        self.limit.saturating_sub(self.start)
    }

    /// Returns `true` if the segment covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.limit
    }

    /// Offset range covered by the segment.
    pub fn range(&self) -> Range<usize> {
        self.start..self.limit
    }
}

/// Cell-based [`TextMeasurer`].
///
/// Tabs are expanded relative to the start of the segment being measured.
#[derive(Debug, Clone)]
pub struct CellTextMeasurer {
    paragraph: Paragraph,
    metrics: CellMetrics,
    /// Intrinsic cell width per character (tabs are resolved at measure time).
    widths: Vec<u8>,
}

impl CellTextMeasurer {
    /// Create a measurer for `paragraph` with default metrics.
    pub fn new(paragraph: &Paragraph) -> Self {
        Self::with_metrics(paragraph, CellMetrics::default())
    }

    /// Create a measurer for `paragraph` using `metrics`.
    pub fn with_metrics(paragraph: &Paragraph, metrics: CellMetrics) -> Self {
        Self {
            widths: intrinsic_widths(paragraph.chars()),
            paragraph: paragraph.clone(),
            metrics,
        }
    }

    /// Active metrics.
    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// The paragraph currently measured.
    pub fn paragraph(&self) -> &Paragraph {
        &self.paragraph
    }

    /// Advance of `[start, limit)`, with tabs expanded from `start`.
    pub fn advance_between(&self, start: usize, limit: usize) -> f32 {
        let range = self.index_range(start, limit);
        self.metrics.advance_of(self.cells_in(range))
    }

    fn index_range(&self, start: usize, limit: usize) -> Range<usize> {
        let begin = self.paragraph.begin_index();
        let len = self.widths.len();
        let from = start.saturating_sub(begin).min(len);
        let to = limit.saturating_sub(begin).min(len);
        from..to.max(from)
    }

    fn width_at(&self, index: usize, x: usize) -> usize {
        match self.paragraph.chars()[index] {
            '\t' => cell_width_at('\t', x, self.metrics.tab_width),
            _ => usize::from(self.widths[index]),
        }
    }

    fn cells_in(&self, range: Range<usize>) -> usize {
        let mut x = 0usize;
        for index in range {
            x = x.saturating_add(self.width_at(index, x));
        }
        x
    }

    fn rebuild(&mut self, paragraph: &Paragraph) {
        tracing::debug!(len = paragraph.len(), "rebuilding cell width cache");
        self.widths = intrinsic_widths(paragraph.chars());
        self.paragraph = paragraph.clone();
    }
}

impl TextMeasurer for CellTextMeasurer {
    type Segment = TextLine;

    fn characters(&self) -> Arc<[char]> {
        self.paragraph.chars().clone()
    }

    fn line_break_index(&mut self, start: usize, max_advance: f32) -> usize {
        let begin = self.paragraph.begin_index();
        let range = self.index_range(start, self.paragraph.end_index());
        if max_advance.is_nan() {
            return begin + range.start;
        }

        let mut x = 0usize;
        let mut index = range.start;
        while index < range.end {
            let w = self.width_at(index, x);
            if self.metrics.advance_of(x + w) > max_advance {
                break;
            }
            x += w;
            index += 1;
        }
        begin + index
    }

    fn layout(&mut self, start: usize, limit: usize) -> TextLine {
        let range = self.index_range(start, limit);
        let chars = &self.paragraph.chars()[range.clone()];

        let visible_len = chars
            .iter()
            .rposition(|&ch| !is_break_whitespace(ch))
            .map_or(0, |i| i + 1);
        let visible = range.start..range.start + visible_len;

        let begin = self.paragraph.begin_index();
        TextLine {
            start: begin + range.start,
            limit: begin + range.end,
            text: chars.iter().collect(),
            advance: self.metrics.advance_of(self.cells_in(range)),
            visible_advance: self.metrics.advance_of(self.cells_in(visible)),
        }
    }

    fn insert_char(&mut self, paragraph: &Paragraph, insert_pos: usize) {
        let index = insert_pos.wrapping_sub(paragraph.begin_index());
        match paragraph.chars().get(index) {
            Some(&ch) if paragraph.len() == self.widths.len() + 1 => {
                tracing::debug!(insert_pos, ?ch, "patching cell width cache (insert)");
                self.widths.insert(index, clamp_width(char_width(ch)));
                self.paragraph = paragraph.clone();
            }
            _ => self.rebuild(paragraph),
        }
    }

    fn delete_char(&mut self, paragraph: &Paragraph, delete_pos: usize) {
        let index = delete_pos.wrapping_sub(paragraph.begin_index());
        if index < self.widths.len() && paragraph.len() + 1 == self.widths.len() {
            tracing::debug!(delete_pos, "patching cell width cache (delete)");
            self.widths.remove(index);
            self.paragraph = paragraph.clone();
        } else {
            self.rebuild(paragraph);
        }
    }
}

fn intrinsic_widths(chars: &[char]) -> Vec<u8> {
    chars.iter().map(|&ch| clamp_width(char_width(ch))).collect()
}

fn clamp_width(width: usize) -> u8 {
    u8::try_from(width).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer(text: &str) -> CellTextMeasurer {
        CellTextMeasurer::new(&Paragraph::new(text))
    }

    #[test]
    fn test_line_break_index_fits_whole_cells() {
        let mut m = measurer("The quick fox");
        assert_eq!(m.line_break_index(0, 7.0), 7);
        assert_eq!(m.line_break_index(0, 7.5), 7);
        assert_eq!(m.line_break_index(4, 3.0), 7);
        assert_eq!(m.line_break_index(0, 100.0), 13);
        assert_eq!(m.line_break_index(13, 5.0), 13);
    }

    #[test]
    fn test_line_break_index_returns_start_when_nothing_fits() {
        let mut m = measurer("你好");
        assert_eq!(m.line_break_index(0, 1.0), 0);
        assert_eq!(m.line_break_index(0, 2.0), 1);
    }

    #[test]
    fn test_nan_advance_fits_nothing() {
        let mut m = measurer("The quick fox");
        assert_eq!(m.line_break_index(0, f32::NAN), 0);
        assert_eq!(m.line_break_index(4, f32::NAN), 4);
        assert_eq!(m.line_break_index(0, f32::INFINITY), 13);
    }

    #[test]
    fn test_zero_width_marks_stay_with_their_base() {
        let mut m = measurer("e\u{301}x");
        assert_eq!(m.line_break_index(0, 1.0), 2);
    }

    #[test]
    fn test_tabs_expand_from_segment_start() {
        let mut m = measurer("ab\tc");
        assert_eq!(m.advance_between(0, 4), 5.0);
        // Starting at the tab, it occupies a full stop.
        assert_eq!(m.advance_between(2, 4), 5.0);
        assert_eq!(m.line_break_index(0, 3.0), 2);
        assert_eq!(m.line_break_index(0, 4.0), 3);
    }

    #[test]
    fn test_cell_advance_scales_widths() {
        let p = Paragraph::new("abcd");
        let metrics = CellMetrics::default().with_cell_advance(2.5);
        let mut m = CellTextMeasurer::with_metrics(&p, metrics);
        assert_eq!(m.advance_between(0, 4), 10.0);
        assert_eq!(m.line_break_index(0, 5.0), 2);
    }

    #[test]
    fn test_layout_reports_visible_advance() {
        let mut m = measurer("aa bb  cc");
        let line = m.layout(3, 7);
        assert_eq!(line.text, "bb  ");
        assert_eq!(line.range(), 3..7);
        assert_eq!(line.len(), 4);
        assert_eq!(line.advance, 4.0);
        assert_eq!(line.visible_advance, 2.0);
    }

    #[test]
    fn test_layout_uses_external_offsets() {
        let p = Paragraph::with_begin("hello world", 100);
        let mut m = CellTextMeasurer::new(&p);
        assert_eq!(m.line_break_index(100, 5.0), 105);
        let line = m.layout(106, 111);
        assert_eq!(line.text, "world");
        assert_eq!(line.start, 106);
    }

    #[test]
    fn test_insert_and_delete_patch_the_cache() {
        let p = Paragraph::new("abc");
        let mut m = CellTextMeasurer::new(&p);

        let inserted = p.with_inserted(1, '你').unwrap();
        m.insert_char(&inserted, 1);
        assert_eq!(m.widths, vec![1, 2, 1, 1]);
        assert_eq!(m.advance_between(0, 4), 5.0);
        assert_eq!(&*m.characters(), &['a', '你', 'b', 'c']);

        let deleted = inserted.with_deleted(0).unwrap();
        m.delete_char(&deleted, 0);
        assert_eq!(m.widths, vec![2, 1, 1]);
        assert_eq!(m.paragraph().text(), "你bc");
    }

    #[test]
    fn test_inconsistent_edit_rebuilds() {
        let p = Paragraph::new("abc");
        let mut m = CellTextMeasurer::new(&p);
        let unrelated = Paragraph::new("你你");
        m.insert_char(&unrelated, 0);
        assert_eq!(m.widths, vec![2, 2]);
        assert_eq!(m.paragraph(), &unrelated);
    }
}
