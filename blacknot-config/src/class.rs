//! Character classes.
//!
//! ASCII-only. Bytes outside the ASCII range never match any class.

/// Space, tab, `\n`, `\r`, form-feed or vertical-tab.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0c | 0x0b)
}

/// First byte of a section or entry name: `A-Z` or `a-z`.
#[inline]
pub fn is_name_starter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Any later byte of a name: a starter, a digit, or `_`.
#[inline]
pub fn is_name_continuer(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
