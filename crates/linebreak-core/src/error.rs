//! Error types.
//!
//! Every error here is an invalid-argument failure: it is raised eagerly, before any state is
//! touched, and is never recovered internally. Reaching the end of text is *not* an error and is
//! reported through `Option` return values instead.

use thiserror::Error;

/// Errors returned by [`LineBreakMeasurer`](crate::LineBreakMeasurer),
/// [`CharWindow`](crate::CharWindow) and [`Paragraph`](crate::Paragraph) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    /// The paragraph has no characters.
    #[error("Paragraph cannot be empty")]
    EmptyParagraph,

    /// The offset limit passed to a segment request is not after the current position.
    #[error("offsetLimit must be after current position (offset limit {offset_limit}, position {position})")]
    OffsetLimitNotAfterPosition {
        /// Requested offset limit.
        offset_limit: usize,
        /// Current measurer position.
        position: usize,
    },

    /// A character window index is outside `begin..=end`.
    #[error("Invalid index: {index} (valid range {begin}..={end})")]
    IndexOutOfRange {
        /// Requested external index.
        index: usize,
        /// Window begin index.
        begin: usize,
        /// Window end index.
        end: usize,
    },

    /// A measurer position is outside the paragraph.
    #[error("Invalid position: {position} (paragraph range {start}..={limit})")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Paragraph start.
        start: usize,
        /// Paragraph limit.
        limit: usize,
    },

    /// An edit offset does not fall inside the edited paragraph.
    #[error("Invalid edit offset: {offset} (paragraph range {begin}..{end})")]
    EditOutOfRange {
        /// Offset of the inserted or deleted character.
        offset: usize,
        /// Paragraph begin index.
        begin: usize,
        /// Paragraph end index.
        end: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MeasureError>;
