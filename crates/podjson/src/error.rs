use std::{io, time::Duration};

use thiserror::Error;

/// A syntax error together with the position it was detected at.
///
/// `offset` is a byte offset into the parsed input; `line` and `column` are
/// 1-based and count bytes, which is what a diagnostic about a network
/// payload wants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError {
    pub(crate) source: SyntaxError,
    /// Byte offset of the offending input.
    pub offset: usize,
    /// 1-based line of the offending input.
    pub line: usize,
    /// 1-based column of the offending input.
    pub column: usize,
}

impl ParserError {
    pub(crate) fn at(source: SyntaxError, input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        let column = 1 + before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(offset, |nl| offset - nl - 1);
        Self {
            source,
            offset,
            line,
            column,
        }
    }

    /// The kind of syntax error.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxError {
        &self.source
    }
}

/// What went wrong while decoding JSON text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Input ended inside a quoted string.
    #[error("unterminated string")]
    UnterminatedString,
    /// A backslash was the last byte of the input.
    #[error("incomplete escape sequence")]
    IncompleteEscape,
    /// A `\u` escape was short, not hex, or an unpaired surrogate.
    #[error("invalid unicode escape: {0}")]
    InvalidUnicodeEscape(&'static str),
    /// A byte that no production accepts at this point.
    #[error("unexpected character '{found}', expected {expected}")]
    UnexpectedCharacter {
        /// The character found in the input.
        found: char,
        /// What the grammar allowed here.
        expected: &'static str,
    },
    /// Input ended where the grammar still required something.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        /// What the grammar allowed here.
        expected: &'static str,
    },
    /// A digit run that does not fit in an `i64`.
    #[error("number does not fit in 64 bits")]
    InvalidNumber,
    /// Decoded string bytes that are not UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    /// Containers nested deeper than [`ParserOptions::max_depth`](crate::ParserOptions::max_depth).
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

/// Failures of [`LineReader::read_line`](crate::LineReader::read_line).
///
/// A timeout leaves every buffered byte in place, so the caller may simply
/// call `read_line` again.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No data arrived within the timeout passed to `read_line`.
    #[error("read timed out after {0:?}")]
    Timeout(Duration),
    /// The peer reset or aborted the connection.
    #[error("connection closed by peer")]
    Closed(#[source] io::Error),
    /// The line buffer could not be grown.
    #[error("failed to grow line buffer to {requested} bytes")]
    Allocation {
        /// Buffer size that was asked for.
        requested: usize,
    },
    /// The peer sent more than the configured maximum without a newline.
    #[error("line exceeds {limit} bytes without a terminator")]
    LineTooLong {
        /// The configured maximum line length.
        limit: usize,
    },
    /// Any other failure of the byte source.
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => Self::Closed(err),
            _ => Self::Io(err),
        }
    }
}
