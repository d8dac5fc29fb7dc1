//!
//! Edit operations for a [MaskedCore].
//!
//! For embedders without an editable text buffer of their own: these
//! apply a user edit directly to the core and reformat, instead of
//! going through [MaskedCore::on_content_changed].
//!

use crate::{MaskError, MaskedCore, upos_type};
use std::ops::Range;

/// Insert user text at the given position.
/// Puts the cursor after the inserted text.
pub fn insert_str(core: &mut MaskedCore, pos: upos_type, t: &str) -> Result<bool, MaskError> {
    if t.is_empty() {
        return Ok(false);
    }
    core.edit_insert_str(pos, t)?;
    Ok(true)
}

/// Type one char at the current cursor position.
/// Replaces the selection if there is one.
pub fn insert_char(core: &mut MaskedCore, c: char) -> Result<bool, MaskError> {
    let sel = core.selection();
    if !sel.is_empty() {
        core.edit_remove_range(sel.into())?;
    }
    let pos = core.selection().start;
    core.edit_insert_str(pos, c.to_string().as_str())?;
    Ok(true)
}

/// Remove a range.
pub fn remove_range(core: &mut MaskedCore, range: Range<upos_type>) -> Result<bool, MaskError> {
    if range.is_empty() {
        return Ok(false);
    }
    core.edit_remove_range(range)?;
    Ok(true)
}

/// Remove the previous character, or the selection if there is one.
pub fn remove_prev_char(core: &mut MaskedCore) -> Result<bool, MaskError> {
    let sel = core.selection();
    if !sel.is_empty() {
        core.edit_remove_range(sel.into())?;
        Ok(true)
    } else if sel.start == 0 {
        Ok(false)
    } else {
        core.edit_remove_range(sel.start - 1..sel.start)?;
        Ok(true)
    }
}

/// Remove the next character, or the selection if there is one.
pub fn remove_next_char(core: &mut MaskedCore) -> Result<bool, MaskError> {
    let sel = core.selection();
    if !sel.is_empty() {
        core.edit_remove_range(sel.into())?;
        Ok(true)
    } else if sel.start >= core.value().len() {
        Ok(false)
    } else {
        core.edit_remove_range(sel.start..sel.start + 1)?;
        Ok(true)
    }
}
