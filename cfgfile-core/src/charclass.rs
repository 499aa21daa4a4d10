//! Character classes for section names, keys and values.
//!
//! The classification tables are plain data so they can be audited
//! independently of the scanner:
//!
//! - [`COMMON_CHARS`] is a sorted byte table searched with binary search.
//! - [`VALUE_EXTRA_CHARS`] is a compile-time perfect-hash set.
//!
//! Section names and keys use the common class only. Values accept the
//! common class plus the punctuation set.

use phf::phf_set;

/// Letters, digits and underscore, in ascending byte order.
pub const COMMON_CHARS: [u8; 63] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Acute accent, the only non-ASCII byte of the value class (Latin-1 0xB4).
pub const ACUTE_ACCENT: u8 = 0xB4;

/// Punctuation accepted inside values in addition to [`COMMON_CHARS`].
pub static VALUE_EXTRA_CHARS: phf::Set<u8> = phf_set! {
    b'!', b'"', b'#', b'$', b'%', b'&', b'\'', b'(', b')', b'*', b'+', b'\xB4',
    b'-', b'.', b'/', b':', b';', b'<', b'=', b'>', b'?', b'@', b'[', b'\\',
    b']', b'^', b'`', b'{', b'|', b'}', b'~',
};

/// True for ASCII letters, digits and `_`.
#[inline]
pub fn is_common_char(b: u8) -> bool {
    COMMON_CHARS.binary_search(&b).is_ok()
}

/// True for the value punctuation set.
#[inline]
pub fn is_value_extra_char(b: u8) -> bool {
    VALUE_EXTRA_CHARS.contains(&b)
}

/// True for any byte allowed inside a value.
#[inline]
pub fn is_value_char(b: u8) -> bool {
    is_common_char(b) || is_value_extra_char(b)
}

/// Space or horizontal tab.
#[inline]
pub fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Decode value bytes one byte per char.
///
/// Every byte maps to the code point of the same number, so the 0xB4
/// accent becomes `´` and [`encode_latin1`] gives the original bytes back.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Encode text produced by [`decode_latin1`] (or validated by a setter)
/// back into bytes. Returns `None` if a char is above U+00FF.
pub fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(c).ok()).collect()
}
