//! Decoding of `\uXXXX` escapes, including surrogate pairs.
//!
//! The decoder works on the bytes that follow the `\u` of an escape. It reads
//! exactly four ASCII hexadecimal digits (`0-9`, `A-F`, `a-f`) and, when
//! those encode the first half of a surrogate pair, a second `\uXXXX` escape
//! immediately after them. Which values count as a first half, and how the two
//! halves combine, depends on the [`SurrogateMode`].
//!
//! # Errors
//!
//! Every failure is reported as a static reason string that the scanner wraps
//! in [`SyntaxError::InvalidUnicodeEscape`](crate::SyntaxError::InvalidUnicodeEscape):
//!
//! - fewer than four bytes remain, or one of them is not a hex digit;
//! - a first half is not followed by another `\u` escape;
//! - (standard mode) the second half is not a low surrogate, or a low
//!   surrogate appears on its own;
//! - the decoded value is not a Unicode scalar value.

use crate::options::SurrogateMode;

const HIGH_SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Convert a single ASCII hex digit into its 0..=15 value.
#[inline]
fn hex_val(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

/// Reads the four hex digits at the start of `bytes`.
fn hex4(bytes: &[u8]) -> Result<u32, &'static str> {
    let digits = bytes.get(..4).ok_or("expected four hex digits")?;
    digits.iter().try_fold(0, |acc, &b| {
        hex_val(b)
            .map(|d| (acc << 4) | d)
            .ok_or("expected four hex digits")
    })
}

/// Reads the `\uXXXX` that must follow the first half of a pair.
fn second_half(bytes: &[u8]) -> Result<u32, &'static str> {
    match bytes {
        [b'\\', b'u', rest @ ..] => hex4(rest),
        _ => Err("unpaired high surrogate"),
    }
}

/// Decodes the escape whose hex digits start `bytes` (just after `\u`).
///
/// Returns the character and how many bytes of `bytes` it occupied: 4 for a
/// single escape, 10 for a pair.
pub(crate) fn decode(bytes: &[u8], mode: SurrogateMode) -> Result<(char, usize), &'static str> {
    let code = hex4(bytes)?;
    let (scalar, used) = match mode {
        SurrogateMode::Standard if HIGH_SURROGATES.contains(&code) => {
            let low = second_half(&bytes[4..])?;
            if !LOW_SURROGATES.contains(&low) {
                return Err("unpaired high surrogate");
            }
            (0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00), 10)
        }
        SurrogateMode::Standard if LOW_SURROGATES.contains(&code) => {
            return Err("unpaired low surrogate");
        }
        SurrogateMode::Legacy if code >> 8 == 0xD8 => {
            let low = second_half(&bytes[4..])?;
            (legacy_pair(code, low), 10)
        }
        _ => (code, 4),
    };
    char::from_u32(scalar)
        .map(|c| (c, used))
        .ok_or("not a unicode scalar value")
}

/// Fixed-offset combination: both halves are reduced as 16-bit values and
/// the result is masked to 20 bits.
fn legacy_pair(high: u32, low: u32) -> u32 {
    let high = high - 0xD800;
    // `low` is at most 0xFFFF, so the truncation is lossless.
    #[allow(clippy::cast_possible_truncation)]
    let low = u32::from((low as u16).wrapping_sub(0xDC00));
    ((low | (high << 10)) + 0x10000) & 0xF_FFFF
}
