use crate::mask_token::{Mask, parse_mask};
use crate::tagged_text::{Tag, TaggedText};
use crate::{MaskError, Selection, upos_type};
use log::debug;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

const DEFAULT_PLACEHOLDER: char = ' ';

/// Formatting core for one masked text field.
///
/// Owns the mask, the placeholder, the tagged buffer and the selection.
/// The embedding text field calls [MaskedCore::on_content_changed] after
/// every edit and writes [MaskedCore::text] and [MaskedCore::selection]
/// back into the visible field.
#[derive(Debug, Clone)]
pub struct MaskedCore {
    /// Mask token for every text position.
    mask: Vec<Mask>,
    /// Mask as given to set_mask().
    mask_string: String,
    /// Fill char for unoccupied positions.
    placeholder: char,
    /// Tagged text.
    value: TaggedText,
    /// Selection/cursor.
    selection: Selection,
    /// Formatting pass in progress. Suppresses nested edit
    /// notifications caused by the pass's own mutations.
    updating: bool,
}

/// Tracks the selection across buffer mutations. Anything inserted or
/// removed strictly before an offset shifts it; a mutation exactly at
/// the offset leaves it in place.
#[derive(Debug)]
struct SelTracker {
    start: upos_type,
    end: upos_type,
}

impl SelTracker {
    fn new(sel: Selection) -> Self {
        Self {
            start: sel.start,
            end: sel.end,
        }
    }

    #[inline]
    fn inserted(&mut self, at: upos_type) {
        if at < self.start {
            self.start += 1;
        }
        if at < self.end {
            self.end += 1;
        }
    }

    #[inline]
    fn removed(&mut self, at: upos_type) {
        if at < self.start {
            self.start -= 1;
        }
        if at < self.end {
            self.end -= 1;
        }
    }

    fn selection(&self, len: upos_type) -> Selection {
        Selection::new(self.start, self.end).clamp(len)
    }
}

impl Default for MaskedCore {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskedCore {
    /// New core with an empty mask. Formatting is inert until a
    /// mask is set.
    pub fn new() -> Self {
        Self {
            mask: Default::default(),
            mask_string: Default::default(),
            placeholder: DEFAULT_PLACEHOLDER,
            value: Default::default(),
            selection: Default::default(),
            updating: false,
        }
    }

    /// Set the mask and reformat the current content.
    ///
    /// Class tokens are `9` digit, `A` letter, `*` letter or digit,
    /// `?` any char. `\` escapes the following character. Everything
    /// else is a separator.
    ///
    /// An empty mask switches formatting off and leaves the buffer
    /// as it is.
    pub fn set_mask(&mut self, mask: &str) -> Result<(), MaskError> {
        self.with_update(|core| {
            core.mask = parse_mask(mask);
            core.mask_string = mask.to_string();
            core.reformat();
        })
    }

    /// The mask as set.
    pub fn mask(&self) -> &str {
        &self.mask_string
    }

    /// Set the placeholder and reformat the current content.
    pub fn set_placeholder(&mut self, placeholder: char) -> Result<(), MaskError> {
        self.with_update(|core| {
            core.placeholder = placeholder;
            core.reformat();
        })
    }

    /// Current placeholder char.
    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Is a mask active?
    pub fn is_masking(&self) -> bool {
        !self.mask.is_empty()
    }

    /// The formatted value.
    pub fn text(&self) -> &str {
        self.value.as_str()
    }

    /// The tagged buffer.
    pub fn value(&self) -> &TaggedText {
        &self.value
    }

    /// The value with all placeholder and literal positions removed.
    /// Does not modify the buffer.
    pub fn raw_value(&self) -> String {
        self.value.raw()
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection. Clamped to the buffer length.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.value.len());
    }

    /// Edit notification.
    ///
    /// To be called by the embedding text field once per discrete edit,
    /// with the edit already reflected in the given text. Recovers the
    /// user input from the old tagging, reapplies the mask and adjusts
    /// the selection.
    ///
    /// Fails with [MaskError::Reentrant] if called from within a
    /// running pass.
    pub fn on_content_changed(
        &mut self,
        text: &str,
        selection: Selection,
    ) -> Result<(), MaskError> {
        self.with_update(|core| {
            core.reconcile(text);
            core.selection = selection.clamp(core.value.len());
            core.reformat();
        })
    }

    /// Delete all placeholder and literal positions in place, keeping
    /// the selection in step. A no-op on a buffer without synthesized
    /// positions.
    pub fn strip(&mut self) {
        let mut sel = SelTracker::new(self.selection);
        Self::strip_pass(&mut self.value, &mut sel);
        self.selection = sel.selection(self.value.len());
    }

    /// Apply a user edit: insert text at the given position, put the
    /// cursor after it, reformat.
    pub(crate) fn edit_insert_str(&mut self, pos: upos_type, t: &str) -> Result<(), MaskError> {
        self.with_update(|core| {
            let n = core.value.insert_str(pos, t, Tag::User)?;
            core.selection = Selection::pos(pos + n);
            core.reformat();
            Ok(())
        })
        .and_then(|v| v)
    }

    /// Apply a user edit: remove the given range, put the cursor at its
    /// start, reformat.
    pub(crate) fn edit_remove_range(&mut self, range: Range<upos_type>) -> Result<(), MaskError> {
        self.with_update(|core| {
            core.value.remove_range(range.clone())?;
            core.selection = Selection::pos(range.start);
            core.reformat();
            Ok(())
        })
        .and_then(|v| v)
    }

    /// Run f with the in-progress flag set. The flag is cleared again
    /// on every exit path before control returns to the caller.
    fn with_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> Result<R, MaskError> {
        if self.updating {
            debug_assert!(false, "reentrant masked update");
            return Err(MaskError::Reentrant);
        }
        self.updating = true;
        let r = f(self);
        self.updating = false;
        Ok(r)
    }

    /// Sync the tagged buffer with the text reported by the field.
    ///
    /// The notification contract guarantees one discrete edit per call,
    /// so the common prefix and suffix pin down the edit exactly. The
    /// changed span is spliced in as user input; tags outside it
    /// survive.
    fn reconcile(&mut self, text: &str) {
        if self.value.as_str() == text {
            return;
        }

        let old: Vec<&str> = self.value.as_str().graphemes(true).collect();
        let new: Vec<&str> = text.graphemes(true).collect();

        let mut prefix = 0;
        while prefix < old.len() && prefix < new.len() && old[prefix] == new[prefix] {
            prefix += 1;
        }
        let mut suffix = 0;
        while suffix < old.len() - prefix
            && suffix < new.len() - prefix
            && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix]
        {
            suffix += 1;
        }

        let ins: String = new[prefix..new.len() - suffix].concat();
        debug!(
            "reconcile {}..{} -> {:?}",
            prefix,
            old.len() - suffix,
            ins
        );

        self.value
            .remove_range(prefix as upos_type..(old.len() - suffix) as upos_type)
            .expect("valid_range");
        if !ins.is_empty() {
            self.value
                .insert_str(prefix as upos_type, &ins, Tag::User)
                .expect("valid_position");
        }
    }

    /// Strip + format with a shared selection anchor.
    fn reformat(&mut self) {
        if self.mask.is_empty() {
            self.selection = self.selection.clamp(self.value.len());
            return;
        }

        let mut sel = SelTracker::new(self.selection);
        Self::strip_pass(&mut self.value, &mut sel);
        Self::format_pass(&self.mask, self.placeholder, &mut self.value, &mut sel);
        self.selection = sel.selection(self.value.len());
    }

    fn strip_pass(value: &mut TaggedText, sel: &mut SelTracker) {
        let mut pos = value.len();
        while pos > 0 {
            pos -= 1;
            if value.tag_at(pos).expect("valid_position") != Tag::User {
                value.remove_at(pos).expect("valid_position");
                sel.removed(pos);
            }
        }
    }

    /// One left-to-right co-scan of mask tokens and buffer positions.
    ///
    /// Every token accounts for exactly one buffer position. Class
    /// tokens consume the next matching user grapheme, dropping
    /// mismatches, or fill in the placeholder when input runs out.
    /// Separators are inserted verbatim. Leftover content beyond the
    /// mask is truncated.
    fn format_pass(
        mask: &[Mask],
        placeholder: char,
        value: &mut TaggedText,
        sel: &mut SelTracker,
    ) {
        let mut cb = [0u8; 4];
        let mut j: upos_type = 0;

        for token in mask {
            match token {
                Mask::Separator(c) => {
                    let sep: &str = c.encode_utf8(&mut cb);
                    let keep = j < value.len()
                        && value.tag_at(j).expect("valid_position") == Tag::Literal
                        && value.grapheme_at(j).expect("valid_position") == sep;
                    if !keep {
                        value.insert_char(j, *c, Tag::Literal).expect("valid_position");
                        sel.inserted(j);
                    }
                    j += 1;
                }
                _ => loop {
                    if j >= value.len() {
                        value
                            .insert_char(j, placeholder, Tag::Placeholder)
                            .expect("valid_position");
                        sel.inserted(j);
                        j += 1;
                        break;
                    }
                    // an already formatted position stays a placeholder
                    if value.tag_at(j).expect("valid_position") == Tag::Placeholder {
                        j += 1;
                        break;
                    }
                    if token.matches(value.grapheme_at(j).expect("valid_position")) {
                        j += 1;
                        break;
                    }
                    // this input can't be placed here. drop it and
                    // retry the token against the next one.
                    value.remove_at(j).expect("valid_position");
                    sel.removed(j);
                },
            }
        }

        // leftover content the mask no longer accounts for
        while value.len() > j {
            let pos = value.len() - 1;
            value.remove_at(pos).expect("valid_position");
            sel.removed(pos);
        }
    }
}
