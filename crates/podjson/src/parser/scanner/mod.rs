//! Scalar token scanner.
//!
//! Decodes one JSON scalar (string, integer, `true`, `false`, `null`) at the
//! position of a [`Cursor`] and advances the cursor past it.
//!
//! The cursor is the only state the scanner keeps. It owns the scratch buffer
//! strings are decoded into, so a tree builder, a streamed pagination loop,
//! or two unrelated parses never share anything hidden.
//!
//! Invariants
//! - On success the cursor sits on the first byte after the token; trailing
//!   whitespace is left for the caller.
//! - On error the cursor position is unspecified and the error carries the
//!   offset of the offending byte.
//! - Bytes inside a quoted string that are not part of an escape are copied
//!   verbatim, control characters included.

use crate::{
    error::{ParserError, SyntaxError},
    options::SurrogateMode,
    parser::unicode,
};

/// A read position into JSON text, plus the scratch space used to decode
/// strings.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    scratch: Vec<u8>,
}

impl<'a> Cursor<'a> {
    /// Starts reading `input` at offset zero.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            scratch: Vec::new(),
        }
    }

    /// Byte offset of the next unread byte.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The whole input, read and unread.
    #[must_use]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// The unread part of the input.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Returns `true` once every byte has been read.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    /// Skips space, `\t`, `\n`, `\v`, `\f` and `\r`.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) = self.peek() {
            self.bump();
        }
    }

    pub(crate) fn error(&self, source: SyntaxError) -> ParserError {
        self.error_at(source, self.pos)
    }

    pub(crate) fn error_at(&self, source: SyntaxError, offset: usize) -> ParserError {
        ParserError::at(source, self.input, offset)
    }

    /// The error for the byte under the cursor not matching `expected`.
    pub(crate) fn unexpected(&self, expected: &'static str) -> ParserError {
        if self.is_at_end() {
            self.error(SyntaxError::UnexpectedEndOfInput { expected })
        } else {
            let (found, _) = bstr::decode_utf8(self.remaining());
            self.error(SyntaxError::UnexpectedCharacter {
                found: found.unwrap_or(char::REPLACEMENT_CHARACTER),
                expected,
            })
        }
    }
}

/// A decoded scalar value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// A quoted string with escapes resolved.
    String(String),
    /// An optionally signed run of decimal digits.
    Number(i64),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

/// The result of [`scan_scalar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    /// The decoded value.
    pub value: Scalar,
    /// Bytes the cursor advanced, leading whitespace and quotes included.
    pub consumed: usize,
    /// Whether the token was a quoted string. Only a quoted token can be an
    /// object key.
    pub quoted: bool,
}

/// Decodes the scalar at the cursor, skipping leading whitespace.
///
/// Recognizes, in order: a quoted string, an optionally signed integer, and
/// the literals `true`, `false` and `null`.
///
/// # Errors
///
/// - [`SyntaxError::UnterminatedString`] if the input ends inside quotes.
/// - [`SyntaxError::IncompleteEscape`] if it ends right after a backslash.
/// - [`SyntaxError::InvalidUnicodeEscape`] for a malformed `\u` escape or an
///   unpaired surrogate (see [`SurrogateMode`]).
/// - [`SyntaxError::InvalidNumber`] if the digits overflow an `i64`.
/// - [`SyntaxError::UnexpectedCharacter`] or
///   [`SyntaxError::UnexpectedEndOfInput`] if no scalar starts here.
///
/// # Examples
///
/// ```
/// use podjson::{Cursor, Scalar, SurrogateMode, scan_scalar};
///
/// let mut cursor = Cursor::new(r#"  "café", 7"#.as_bytes());
/// let scanned = scan_scalar(&mut cursor, SurrogateMode::Standard).unwrap();
/// assert_eq!(scanned.value, Scalar::String("café".into()));
/// assert_eq!(scanned.consumed, 9);
/// assert!(scanned.quoted);
/// assert_eq!(cursor.remaining(), b", 7");
/// ```
pub fn scan_scalar(cursor: &mut Cursor<'_>, mode: SurrogateMode) -> Result<Scanned, ParserError> {
    let start = cursor.offset();
    cursor.skip_whitespace();
    let (value, quoted) = match cursor.peek() {
        Some(b'"') => (Scalar::String(scan_string(cursor, mode)?), true),
        Some(b'-' | b'0'..=b'9') => (Scalar::Number(scan_number(cursor)?), false),
        Some(b't') => (scan_literal(cursor, b"true", Scalar::Bool(true))?, false),
        Some(b'f') => (scan_literal(cursor, b"false", Scalar::Bool(false))?, false),
        Some(b'n') => (scan_literal(cursor, b"null", Scalar::Null)?, false),
        _ => return Err(cursor.unexpected("scalar value")),
    };
    Ok(Scanned {
        value,
        consumed: cursor.offset() - start,
        quoted,
    })
}

fn scan_string(cursor: &mut Cursor<'_>, mode: SurrogateMode) -> Result<String, ParserError> {
    let open = cursor.offset();
    cursor.bump();
    cursor.scratch.clear();
    loop {
        let rest = cursor.remaining();
        let Some(at) = rest.iter().position(|&b| b == b'"' || b == b'\\') else {
            return Err(cursor.error_at(SyntaxError::UnterminatedString, open));
        };
        let run = &rest[..at];
        if let Err(e) = core::str::from_utf8(run) {
            let bad = cursor.offset() + e.valid_up_to();
            return Err(cursor.error_at(SyntaxError::InvalidUtf8, bad));
        }
        cursor.scratch.extend_from_slice(run);
        cursor.pos += at;
        if rest[at] == b'"' {
            cursor.bump();
            break;
        }

        let backslash = cursor.offset();
        cursor.bump();
        let Some(escaped) = cursor.peek() else {
            return Err(cursor.error_at(SyntaxError::IncompleteEscape, backslash));
        };
        // A backslash before a multi-byte character is dropped and the
        // character is read with the next run.
        if !escaped.is_ascii() {
            continue;
        }
        cursor.bump();
        let decoded = match escaped {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'b' => 0x08,
            b'f' => 0x0c,
            b'v' => 0x0b,
            b'u' => {
                let (c, used) = unicode::decode(cursor.remaining(), mode).map_err(|reason| {
                    cursor.error_at(SyntaxError::InvalidUnicodeEscape(reason), backslash)
                })?;
                cursor.pos += used;
                let mut utf8 = [0u8; 4];
                cursor
                    .scratch
                    .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                continue;
            }
            // `\\`, `\"`, `\/` and anything unknown stand for themselves.
            other => other,
        };
        cursor.scratch.push(decoded);
    }

    // Runs are checked as they are copied, so this only fails if an escape
    // produced something other than UTF-8.
    match core::str::from_utf8(&cursor.scratch) {
        Ok(s) => Ok(s.to_owned()),
        Err(_) => Err(cursor.error_at(SyntaxError::InvalidUtf8, open)),
    }
}

fn scan_number(cursor: &mut Cursor<'_>) -> Result<i64, ParserError> {
    let start = cursor.offset();
    if cursor.peek() == Some(b'-') {
        cursor.bump();
    }
    let digits_start = cursor.offset();
    while cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
        cursor.bump();
    }
    if cursor.offset() == digits_start {
        return Err(cursor.unexpected("digit"));
    }
    core::str::from_utf8(&cursor.input[start..cursor.pos])
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| cursor.error_at(SyntaxError::InvalidNumber, start))
}

fn scan_literal(
    cursor: &mut Cursor<'_>,
    literal: &'static [u8],
    value: Scalar,
) -> Result<Scalar, ParserError> {
    let rest = cursor.remaining();
    let matched = rest
        .iter()
        .zip(literal)
        .take_while(|(a, b)| a == b)
        .count();
    cursor.pos += matched;
    if matched == literal.len() {
        Ok(value)
    } else {
        Err(cursor.unexpected(match value {
            Scalar::Bool(true) => "'true'",
            Scalar::Bool(false) => "'false'",
            _ => "'null'",
        }))
    }
}
