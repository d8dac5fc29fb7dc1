use crate::{MaskError, upos_type};
use std::iter::{once, repeat_n};
use std::mem;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Classification of one buffer position.
///
/// Placeholder and literal positions are synthesized by the formatting
/// pass and removed again when stripping; user positions are the real
/// content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    User,
    Placeholder,
    Literal,
}

/// Single-line text-store with one [Tag] per grapheme.
#[derive(Debug, Default, Clone)]
pub struct TaggedText {
    // text
    text: String,
    // tag per grapheme
    tags: Vec<Tag>,
    // len as grapheme count
    len: upos_type,
    // tmp buffer
    buf: String,
}

/// Length as grapheme count.
#[inline]
fn str_len(s: &str) -> upos_type {
    s.graphemes(true).count() as upos_type
}

impl TaggedText {
    /// New empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// New from string, all positions tagged alike.
    pub fn new_text(t: &str, tag: Tag) -> Self {
        let len = str_len(t);
        Self {
            text: t.into(),
            tags: vec![tag; len as usize],
            len,
            buf: Default::default(),
        }
    }

    /// str
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Get content as string.
    pub fn string(&self) -> String {
        self.text.to_string()
    }

    /// Length in graphemes.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tag at the given position.
    #[inline]
    pub fn tag_at(&self, pos: upos_type) -> Result<Tag, MaskError> {
        self.tags
            .get(pos as usize)
            .copied()
            .ok_or(MaskError::PositionOutOfBounds(pos, self.len))
    }

    /// Grapheme position to byte position.
    /// This is the (start,end) position of the single grapheme after pos.
    fn byte_range_at(&self, pos: upos_type) -> Result<Range<usize>, MaskError> {
        let mut byte_range = None;
        for (cidx, (idx, c)) in self
            .text
            .grapheme_indices(true)
            .chain(once((self.text.len(), "")))
            .enumerate()
        {
            if cidx == pos as usize {
                byte_range = Some(idx..idx + c.len());
                break;
            }
        }

        if let Some(byte_range) = byte_range {
            Ok(byte_range)
        } else {
            Err(MaskError::PositionOutOfBounds(pos, self.len))
        }
    }

    /// Grapheme range to byte range.
    fn byte_range(&self, range: Range<upos_type>) -> Result<Range<usize>, MaskError> {
        if range.start > range.end || range.end > self.len {
            return Err(MaskError::RangeOutOfBounds(range.start, range.end, self.len));
        }
        let start = self.byte_range_at(range.start)?.start;
        let end = self.byte_range_at(range.end)?.start;
        Ok(start..end)
    }

    /// Grapheme at the given position.
    pub fn grapheme_at(&self, pos: upos_type) -> Result<&str, MaskError> {
        if pos >= self.len {
            return Err(MaskError::PositionOutOfBounds(pos, self.len));
        }
        let range = self.byte_range_at(pos)?;
        Ok(&self.text[range])
    }

    /// Iterate over graphemes with their tags.
    pub fn graphemes(&self) -> impl Iterator<Item = (&str, Tag)> {
        self.text.graphemes(true).zip(self.tags.iter().copied())
    }

    /// The content with everything but [Tag::User] positions removed.
    pub fn raw(&self) -> String {
        self.graphemes()
            .filter(|(_, tag)| *tag == Tag::User)
            .map(|(g, _)| g)
            .collect()
    }

    /// Insert a char at the given position.
    pub fn insert_char(&mut self, pos: upos_type, c: char, tag: Tag) -> Result<(), MaskError> {
        let byte_pos = self.byte_range_at(pos)?;
        let (before, after) = self.text.split_at(byte_pos.start);

        self.buf.clear();
        self.buf.push_str(before);
        self.buf.push(c);
        self.buf.push_str(after);

        let new_len = str_len(&self.buf);
        mem::swap(&mut self.text, &mut self.buf);

        self.tags.insert(pos as usize, tag);
        self.len = new_len;
        debug_assert_eq!(self.len as usize, self.tags.len());

        Ok(())
    }

    /// Insert a str at the given position, every grapheme tagged alike.
    /// Returns the number of graphemes inserted.
    pub fn insert_str(&mut self, pos: upos_type, t: &str, tag: Tag) -> Result<upos_type, MaskError> {
        let byte_pos = self.byte_range_at(pos)?;
        let (before, after) = self.text.split_at(byte_pos.start);

        self.buf.clear();
        self.buf.push_str(before);
        self.buf.push_str(t);
        self.buf.push_str(after);

        let n = str_len(t);
        let new_len = str_len(&self.buf);
        mem::swap(&mut self.text, &mut self.buf);

        self.tags
            .splice(pos as usize..pos as usize, repeat_n(tag, n as usize));
        self.len = new_len;
        debug_assert_eq!(self.len as usize, self.tags.len());

        Ok(n)
    }

    /// Remove the grapheme at the given position.
    pub fn remove_at(&mut self, pos: upos_type) -> Result<(), MaskError> {
        if pos >= self.len {
            return Err(MaskError::PositionOutOfBounds(pos, self.len));
        }
        self.remove_range(pos..pos + 1)?;
        Ok(())
    }

    /// Remove a grapheme range. Returns the removed text.
    pub fn remove_range(&mut self, range: Range<upos_type>) -> Result<String, MaskError> {
        let bytes = self.byte_range(range.clone())?;

        let (before, remove, after) = (
            &self.text[..bytes.start],
            &self.text[bytes.start..bytes.end],
            &self.text[bytes.end..],
        );

        self.buf.clear();
        self.buf.push_str(before);
        self.buf.push_str(after);

        let remove_str = remove.to_string();
        let new_len = str_len(&self.buf);
        mem::swap(&mut self.text, &mut self.buf);

        self.tags.drain(range.start as usize..range.end as usize);
        self.len = new_len;
        debug_assert_eq!(self.len as usize, self.tags.len());

        Ok(remove_str)
    }
}
