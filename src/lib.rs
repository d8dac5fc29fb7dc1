#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Range;

pub mod mask_op;

mod mask_token;
mod masked_core;
mod tagged_text;

pub use mask_token::{Mask, parse_mask};
pub use masked_core::MaskedCore;
pub use tagged_text::{Tag, TaggedText};

/// Text position type.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

#[derive(Debug, PartialEq)]
pub enum MaskError {
    /// An edit notification arrived while a formatting pass was
    /// still running.
    Reentrant,
    /// Indicates that the passed position was out of bounds.
    ///
    /// Contains the position attempted and the actual length of the
    /// text in graphemes, in that order.
    PositionOutOfBounds(upos_type, upos_type),
    /// Indicates that the passed range was partially or fully out of
    /// bounds, or reversed.
    ///
    /// Contains the [start, end) positions of the range and the actual
    /// length of the text in graphemes, in that order.
    RangeOutOfBounds(upos_type, upos_type, upos_type),
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MaskError {}

/// Selection into the masked text. A plain cursor is start == end.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Selection {
    pub start: upos_type,
    pub end: upos_type,
}

impl Debug for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<Range<upos_type>> for Selection {
    fn from(value: Range<upos_type>) -> Self {
        Selection::new(value.start, value.end)
    }
}

impl From<Selection> for Range<upos_type> {
    fn from(value: Selection) -> Self {
        value.start..value.end
    }
}

impl Selection {
    /// New selection.
    ///
    /// Panic
    /// Panics if start > end.
    pub const fn new(start: upos_type, end: upos_type) -> Self {
        assert!(start <= end);
        Self { start, end }
    }

    /// Cursor without selected text.
    pub const fn pos(pos: upos_type) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Empty selection.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both offsets to the given length.
    #[inline]
    pub(crate) fn clamp(self, len: upos_type) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}
