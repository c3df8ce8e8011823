//! Strict UTF-8 rune decoding shared by the codepoint-aware distances.
//!
//! # Malformed input policy
//! [`decode_rune`] rejects anything `std::str::from_utf8` would reject at that
//! position: stray continuation bytes, invalid lead bytes (`0xC0`, `0xC1`,
//! `0xF5..`), truncated sequences, bad continuation bytes, overlong forms,
//! surrogates, and values above `U+10FFFF`.
//!
//! The distance kernels never stop on such input. Each malformed position
//! consumes exactly one byte and becomes the unit `INVALID_RUNE_TAG | byte`,
//! which sits outside the Unicode range and so never equals a real
//! codepoint. Two identical malformed bytes still compare equal.

use thiserror::Error;

/// Marker bit for units produced from malformed bytes.
pub const INVALID_RUNE_TAG: u32 = 0x8000_0000;

/// A malformed sequence was found while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid UTF-8 lead byte {byte:#04x}")]
pub struct InvalidEncoding {
    /// The byte at the start of the rejected sequence.
    pub byte: u8,
}

/// One decoded unit and the number of bytes it consumed (1 to 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rune {
    pub code: u32,
    pub width: usize,
}

#[inline(always)]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Decode the rune at the start of `text`.
///
/// # Errors
/// `InvalidEncoding` if `text` does not start with a well-formed UTF-8
/// sequence. An empty `text` reports byte `0x00`.
pub fn decode_rune(text: &[u8]) -> Result<Rune, InvalidEncoding> {
    let Some(&lead) = text.first() else {
        return Err(InvalidEncoding { byte: 0 });
    };
    let invalid = InvalidEncoding { byte: lead };

    let (width, init, min) = match lead {
        0x00..=0x7F => {
            return Ok(Rune {
                code: u32::from(lead),
                width: 1,
            })
        }
        0xC2..=0xDF => (2, u32::from(lead & 0x1F), 0x80),
        0xE0..=0xEF => (3, u32::from(lead & 0x0F), 0x800),
        0xF0..=0xF4 => (4, u32::from(lead & 0x07), 0x1_0000),
        _ => return Err(invalid),
    };
    if text.len() < width {
        return Err(invalid);
    }

    let mut code = init;
    for &b in &text[1..width] {
        if !is_continuation(b) {
            return Err(invalid);
        }
        code = (code << 6) | u32::from(b & 0x3F);
    }

    if code < min || code > 0x10_FFFF || (0xD800..=0xDFFF).contains(&code) {
        return Err(invalid);
    }
    Ok(Rune { code, width })
}

/// Decode one comparison unit, applying the malformed-input policy.
///
/// Always consumes at least one byte of a non-empty `text`.
#[inline]
pub fn decode_unit(text: &[u8]) -> Rune {
    match decode_rune(text) {
        Ok(rune) => rune,
        Err(InvalidEncoding { byte }) => Rune {
            code: INVALID_RUNE_TAG | u32::from(byte),
            width: 1,
        },
    }
}

/// Iterator over the comparison units of a byte string.
pub struct Units<'a> {
    rest: &'a [u8],
}

impl<'a> Units<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self { rest: text }
    }
}

impl Iterator for Units<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.rest.is_empty() {
            return None;
        }
        let rune = decode_unit(self.rest);
        self.rest = &self.rest[rune.width..];
        Some(rune.code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len().div_ceil(4), Some(self.rest.len()))
    }
}

/// `true` when every byte of `text` is well-formed UTF-8.
pub fn runes_valid(text: &[u8]) -> bool {
    let mut rest = text;
    while !rest.is_empty() {
        match decode_rune(rest) {
            Ok(rune) => rest = &rest[rune.width..],
            Err(_) => return false,
        }
    }
    true
}

/// Write the units of `text` into `out`, returning how many were written.
///
/// Writing stops when `out` is full; size it with `Units::new(text).count()`
/// or `text.len()` for the worst case of one unit per byte.
pub(crate) fn export_units(text: &[u8], out: &mut [usize]) -> usize {
    let mut count = 0;
    for (slot, unit) in out.iter_mut().zip(Units::new(text)) {
        *slot = unit as usize;
        count += 1;
    }
    count
}
