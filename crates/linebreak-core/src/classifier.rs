//! Break boundary classification.
//!
//! A [`BreakClassifier`] answers "where may a line end?" for the text exposed by a
//! [`CharWindow`]. All offsets are in the window's external coordinate space, so a classifier
//! bound to a window anchored at `begin` never reports an offset below `begin`.
//!
//! [`BoundaryClassifier`] is the built-in implementation. It supports three rule sets:
//!
//! - [`BreakRules::Line`]: UAX #14 line break opportunities (via `unicode-linebreak`)
//! - [`BreakRules::Word`]: UAX #29 word boundaries (via `unicode-segmentation`)
//! - [`BreakRules::Whitespace`]: a boundary after every run of whitespace

use unicode_segmentation::UnicodeSegmentation;

use crate::char_window::CharWindow;

/// Boundary queries consumed by [`LineBreakMeasurer`](crate::LineBreakMeasurer).
///
/// The classifier keeps a *current boundary*; every query that returns `Some` moves it there.
/// Every text has at least two boundaries (its begin and end index), which coincide for empty
/// text.
pub trait BreakClassifier {
    /// Bind the classifier to a new text source. The current boundary moves to the first one.
    fn set_text(&mut self, text: CharWindow);

    /// The bound text source.
    fn text(&self) -> &CharWindow;

    /// Move to the first boundary and return it.
    fn first(&mut self) -> usize;

    /// Move to the last boundary and return it.
    fn last(&mut self) -> usize;

    /// Move to the boundary after the current one.
    fn next(&mut self) -> Option<usize>;

    /// Move to the boundary before the current one.
    fn previous(&mut self) -> Option<usize>;

    /// The current boundary.
    fn current(&self) -> usize;

    /// Move to the first boundary strictly after `offset`.
    fn following(&mut self, offset: usize) -> Option<usize>;

    /// Move to the last boundary strictly before `offset`.
    fn preceding(&mut self, offset: usize) -> Option<usize>;

    /// Returns `true` if `offset` is a boundary.
    fn is_boundary(&self, offset: usize) -> bool;
}

/// Boundary rule set used by [`BoundaryClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakRules {
    /// Line break opportunities (UAX #14).
    #[default]
    Line,
    /// Word boundaries (UAX #29).
    Word,
    /// Break after every run of whitespace.
    Whitespace,
}

/// Table-driven [`BreakClassifier`].
///
/// The boundary table is computed once per [`set_text`](BreakClassifier::set_text) and then
/// navigated with binary search.
#[derive(Debug, Clone)]
pub struct BoundaryClassifier {
    rules: BreakRules,
    text: CharWindow,
    /// Sorted, deduplicated, external offsets.
    boundaries: Vec<usize>,
    /// Index into `boundaries`.
    current: usize,
}

impl BoundaryClassifier {
    /// Create an unbound classifier using `rules`.
    pub fn new(rules: BreakRules) -> Self {
        Self {
            rules,
            text: CharWindow::empty(),
            boundaries: vec![0],
            current: 0,
        }
    }

    /// Line break opportunity classifier (UAX #14).
    pub fn line() -> Self {
        Self::new(BreakRules::Line)
    }

    /// Word boundary classifier (UAX #29).
    pub fn word() -> Self {
        Self::new(BreakRules::Word)
    }

    /// Whitespace-run classifier.
    pub fn whitespace() -> Self {
        Self::new(BreakRules::Whitespace)
    }

    /// Active rule set.
    pub fn rules(&self) -> BreakRules {
        self.rules
    }

    /// All boundaries of the bound text, in ascending order.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    fn move_to(&mut self, index: usize) -> usize {
        self.current = index;
        self.boundaries[index]
    }
}

impl Default for BoundaryClassifier {
    fn default() -> Self {
        Self::line()
    }
}

impl BreakClassifier for BoundaryClassifier {
    fn set_text(&mut self, text: CharWindow) {
        self.boundaries = compute_boundaries(&text, self.rules);
        self.text = text;
        self.current = 0;
    }

    fn text(&self) -> &CharWindow {
        &self.text
    }

    fn first(&mut self) -> usize {
        self.move_to(0)
    }

    fn last(&mut self) -> usize {
        self.move_to(self.boundaries.len() - 1)
    }

    fn next(&mut self) -> Option<usize> {
        if self.current + 1 < self.boundaries.len() {
            Some(self.move_to(self.current + 1))
        } else {
            None
        }
    }

    fn previous(&mut self) -> Option<usize> {
        if self.current > 0 {
            Some(self.move_to(self.current - 1))
        } else {
            None
        }
    }

    fn current(&self) -> usize {
        self.boundaries[self.current]
    }

    fn following(&mut self, offset: usize) -> Option<usize> {
        let index = self.boundaries.partition_point(|&b| b <= offset);
        if index < self.boundaries.len() {
            Some(self.move_to(index))
        } else {
            self.last();
            None
        }
    }

    fn preceding(&mut self, offset: usize) -> Option<usize> {
        let index = self.boundaries.partition_point(|&b| b < offset);
        if index > 0 {
            Some(self.move_to(index - 1))
        } else {
            self.first();
            None
        }
    }

    fn is_boundary(&self, offset: usize) -> bool {
        self.boundaries.binary_search(&offset).is_ok()
    }
}

/// Compute the boundary table for `text`, always including its begin and end index.
fn compute_boundaries(text: &CharWindow, rules: BreakRules) -> Vec<usize> {
    let begin = text.begin_index();

    // Walk the window with its own cursor contract; the caller's position is left untouched.
    let mut cursor = text.clone();
    let mut chars = Vec::with_capacity(cursor.len());
    let mut ch = cursor.first();
    while let Some(c) = ch {
        chars.push(c);
        ch = cursor.next();
    }

    let mut boundaries = vec![begin];
    match rules {
        BreakRules::Line => {
            let s: String = chars.iter().collect();
            let byte_starts = char_byte_starts(&s);
            boundaries.extend(
                unicode_linebreak::linebreaks(&s)
                    .map(|(byte, _)| begin + byte_to_char(&byte_starts, byte)),
            );
        }
        BreakRules::Word => {
            let s: String = chars.iter().collect();
            let byte_starts = char_byte_starts(&s);
            boundaries.extend(
                s.split_word_bound_indices()
                    .map(|(byte, word)| begin + byte_to_char(&byte_starts, byte + word.len())),
            );
        }
        BreakRules::Whitespace => {
            for (i, pair) in chars.windows(2).enumerate() {
                if pair[0].is_whitespace() && !pair[1].is_whitespace() {
                    boundaries.push(begin + i + 1);
                }
            }
        }
    }
    boundaries.push(begin + chars.len());

    boundaries.sort_unstable();
    boundaries.dedup();
    boundaries
}

fn char_byte_starts(s: &str) -> Vec<usize> {
    s.char_indices().map(|(b, _)| b).collect()
}

fn byte_to_char(byte_starts: &[usize], byte: usize) -> usize {
    byte_starts.partition_point(|&b| b < byte)
}
