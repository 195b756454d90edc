//! Escaping of raw header text for JSON string literals.
//!
//! Header text is 8-bit data with no declared encoding, so bytes are never
//! decoded. Every byte outside printable ASCII becomes `\u00XX` carrying the
//! byte value itself. For 0x80-0xFF this reads back as the Latin-1 code
//! point, not as whatever the original encoding meant; consumers that care
//! must re-encode.
//!
//! A backslash is printable and is copied as-is, so text containing `\`
//! does not produce a valid JSON string. Every other byte value does.

use crate::utils::c_str;

/// Length of the longest escape sequence, `\u00XX`.
pub const ESCAPE_WIDTH: usize = 6;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Escape `field` up to its first NUL.
///
/// * bytes below 0x20 or above 0x7E become `\u00XX` (lowercase hex),
/// * `"` becomes `\"`,
/// * every other byte is copied as-is.
pub fn escape_json(field: &[u8]) -> String {
    let text = c_str(field);
    let mut out = String::with_capacity(text.len() * ESCAPE_WIDTH + 1);
    for &b in text {
        match b {
            b'"' => out.push_str("\\\""),
            0x20..=0x7e => out.push(char::from(b)),
            _ => {
                out.push_str("\\u00");
                out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
                out.push(char::from(HEX_DIGITS[usize::from(b & 0x0f)]));
            }
        }
    }
    out
}
