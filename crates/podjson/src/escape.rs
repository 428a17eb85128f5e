//! Escaping text for outgoing JSON bodies.
//!
//! The mapping is the exact inverse of the string decoding done by the
//! [scanner](crate::parser::scanner): `" \ /` and the control characters
//! `\r \b \f \n \t \v` become two-byte escapes, everything else (non-ASCII
//! included) is copied unchanged.

use core::fmt::{self, Write};

/// Writes `src` with JSON escapes applied to `f`.
pub(crate) fn write_escaped<W: Write>(src: &str, f: &mut W) -> fmt::Result {
    let mut rest = src;
    while let Some(at) = rest.find(needs_escape) {
        f.write_str(&rest[..at])?;
        // `needs_escape` only matches ASCII, so `at + 1` is a char boundary.
        let escaped = match rest.as_bytes()[at] {
            b'\r' => "\\r",
            0x08 => "\\b",
            0x0c => "\\f",
            b'\n' => "\\n",
            b'\t' => "\\t",
            0x0b => "\\v",
            b'\\' => "\\\\",
            b'/' => "\\/",
            _ => "\\\"",
        };
        f.write_str(escaped)?;
        rest = &rest[at + 1..];
    }
    f.write_str(rest)
}

fn needs_escape(c: char) -> bool {
    matches!(
        c,
        '\r' | '\u{8}' | '\u{c}' | '\n' | '\t' | '\u{b}' | '\\' | '/' | '"'
    )
}

/// Escapes `text` for embedding between the quotes of a JSON string.
///
/// ```
/// assert_eq!(podjson::escape("say \"hi\"\n"), r#"say \"hi\"\n"#);
/// assert_eq!(podjson::escape("a/b"), r"a\/b");
/// assert_eq!(podjson::escape("héllo"), "héllo");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    // Writing into a String cannot fail.
    let _ = write_escaped(text, &mut out);
    out
}

/// Validates that `bytes` are UTF-8, then escapes them.
///
/// Text typed into an editor or read from a file is not guaranteed to be
/// UTF-8; the pod rejects bodies that are not.
///
/// # Errors
///
/// Returns the [`Utf8Error`](core::str::Utf8Error) describing the first
/// invalid sequence.
pub fn escape_bytes(bytes: &[u8]) -> Result<String, core::str::Utf8Error> {
    core::str::from_utf8(bytes).map(escape)
}
