use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// One token of the input mask.
///
/// Class tokens accept a restricted set of characters and display a
/// placeholder while unfilled. Separators are emitted verbatim.
#[allow(variant_size_differences)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Mask {
    // 0-9, mask char 9
    Digit,
    // letter, mask char A
    Letter,
    // letter or digit, mask char *
    LetterOrDigit,
    // anything, mask char ?
    AnyChar,
    // verbatim character
    Separator(char),
}

const MASK_DIGIT: char = '9';
const MASK_LETTER: char = 'A';
const MASK_LETTER_OR_DIGIT: char = '*';
const MASK_ANY_CHAR: char = '?';
const MASK_ESCAPE: char = '\\';

impl Display for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mask::Digit => write!(f, "{}", MASK_DIGIT),
            Mask::Letter => write!(f, "{}", MASK_LETTER),
            Mask::LetterOrDigit => write!(f, "{}", MASK_LETTER_OR_DIGIT),
            Mask::AnyChar => write!(f, "{}", MASK_ANY_CHAR),
            Mask::Separator(c) => {
                if is_mask_char(*c) || *c == MASK_ESCAPE {
                    write!(f, "{}", MASK_ESCAPE)?;
                }
                write!(f, "{}", c)
            }
        }
    }
}

impl Debug for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mask::Separator(c) => write!(f, "\\{}", c),
            _ => write!(f, "{}", self),
        }
    }
}

/// Is this one of the class-token characters?
#[inline]
fn is_mask_char(c: char) -> bool {
    matches!(
        c,
        MASK_DIGIT | MASK_LETTER | MASK_LETTER_OR_DIGIT | MASK_ANY_CHAR
    )
}

impl Mask {
    /// Valid input for this token.
    ///
    /// Works on one grapheme. Multi-char graphemes match the letter
    /// classes if all their chars do.
    #[inline]
    pub fn matches(&self, g: &str) -> bool {
        let mut chars = g.chars();
        let Some(c0) = chars.next() else {
            return false;
        };
        let single = chars.next().is_none();

        match self {
            Mask::AnyChar => true,
            Mask::Letter => g.chars().all(char::is_alphabetic),
            Mask::Digit => single && c0.is_ascii_digit(),
            Mask::LetterOrDigit => {
                (single && c0.is_ascii_digit()) || g.chars().all(char::is_alphabetic)
            }
            Mask::Separator(sep) => single && c0 == *sep,
        }
    }
}

/// Parse a mask string into tokens.
///
/// The escape character consumes the following character and turns it
/// into a separator, even if it is a class token. A trailing escape
/// with nothing following it contributes no token.
pub fn parse_mask(mask: &str) -> Vec<Mask> {
    let mut tokens = Vec::new();

    let mut esc = false;
    for c in mask.chars() {
        if esc {
            tokens.push(Mask::Separator(c));
            esc = false;
        } else if c == MASK_ESCAPE {
            esc = true;
        } else if is_mask_char(c) {
            tokens.push(match c {
                MASK_DIGIT => Mask::Digit,
                MASK_LETTER => Mask::Letter,
                MASK_LETTER_OR_DIGIT => Mask::LetterOrDigit,
                MASK_ANY_CHAR => Mask::AnyChar,
                _ => unreachable!("mask char"),
            });
        } else {
            tokens.push(Mask::Separator(c));
        }
    }

    tokens
}
