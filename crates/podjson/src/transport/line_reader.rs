use std::time::Duration;

use bstr::ByteSlice;

use super::{ByteSource, Chunk, Line};
use crate::{error::TransportError, options::LineReaderOptions};

/// Turns a [`ByteSource`] into newline-terminated lines.
///
/// The reader owns one growable buffer for the lifetime of a connection.
/// Unconsumed bytes always start at offset 0: after a line is returned, the
/// bytes behind it are moved to the front. The buffer grows by a fixed
/// increment when a line does not fit and never shrinks.
///
/// A line ends at `\n`; a `\r` right before it is stripped too. When the
/// source ends with bytes still buffered, those bytes come back once as a
/// final line. Every call after that returns `Ok(None)`.
///
/// A line longer than [`LineReaderOptions::max_line_length`] is reported once
/// as [`TransportError::LineTooLong`] and skipped through its terminator;
/// framing resumes with the line after it.
#[derive(Debug)]
pub struct LineReader {
    buf: Vec<u8>,
    /// Bytes of `buf` holding data.
    filled: usize,
    /// Prefix of the held bytes already known to contain no `\n`.
    scanned: usize,
    eof: bool,
    /// Skipping the rest of an overlong line up to its `\n`.
    discarding: bool,
    options: LineReaderOptions,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// A reader with default [`LineReaderOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(LineReaderOptions::default())
    }

    /// A reader with the given buffer sizing.
    #[must_use]
    pub fn with_options(options: LineReaderOptions) -> Self {
        Self {
            buf: vec![0; options.initial_capacity.max(1)],
            filled: 0,
            scanned: 0,
            eof: false,
            discarding: false,
            options,
        }
    }

    /// Bytes received but not yet returned as part of a line.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// Current size of the line buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Whether the source has reported end of stream.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Returns the next line, reading from `source` as needed.
    ///
    /// Each read waits at most `timeout`. `Ok(None)` means the stream has
    /// ended and every byte has been returned.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Timeout`] if a read timed out. Buffered bytes are
    ///   kept and the call can simply be repeated.
    /// - [`TransportError::LineTooLong`] if more than
    ///   [`LineReaderOptions::max_line_length`] bytes arrive without a
    ///   terminator, or the stream ends on such a line. The line is dropped
    ///   through its `\n` and the bytes behind it are kept for the next call.
    /// - [`TransportError::Allocation`] if the buffer cannot grow.
    /// - [`TransportError::Closed`] or [`TransportError::Io`] if the source
    ///   fails.
    pub fn read_line<S>(
        &mut self,
        source: &mut S,
        timeout: Duration,
    ) -> Result<Option<Line>, TransportError>
    where
        S: ByteSource + ?Sized,
    {
        loop {
            if self.discarding {
                self.skip_overlong();
            }
            if !self.discarding {
                if let Some(at) = self.buf[self.scanned..self.filled].find_byte(b'\n') {
                    let end = self.scanned + at;
                    let content = if end > 0 && self.buf[end - 1] == b'\r' {
                        end - 1
                    } else {
                        end
                    };
                    if let Err(err) = self.check_length(content) {
                        self.discard(end + 1);
                        return Err(err);
                    }
                    return Ok(Some(self.take(content, end + 1)));
                }
                self.scanned = self.filled;
            }

            if self.eof {
                if self.filled == 0 {
                    return Ok(None);
                }
                let len = self.filled;
                if let Err(err) = self.check_length(len) {
                    self.discard(len);
                    return Err(err);
                }
                return Ok(Some(self.take(len, len)));
            }

            if !self.discarding {
                // A trailing `\r` may still turn out to belong to the terminator.
                let pending = self.filled.saturating_sub(1);
                if let Err(err) = self.check_length(pending) {
                    self.discard(self.filled);
                    self.discarding = true;
                    return Err(err);
                }
            }

            if self.filled == self.buf.len() {
                self.grow()?;
            }

            match source.read(&mut self.buf[self.filled..], timeout)? {
                Chunk::Data(0) | Chunk::EndOfStream => {
                    tracing::debug!(buffered = self.filled, "byte source reached end of stream");
                    self.eof = true;
                }
                Chunk::Data(n) => self.filled += n,
                Chunk::TimedOut => {
                    tracing::debug!(?timeout, buffered = self.filled, "line read timed out");
                    return Err(TransportError::Timeout(timeout));
                }
            }
        }
    }

    /// Returns the first line `pred` accepts, discarding the lines before
    /// it. `Ok(None)` if the stream ends first.
    ///
    /// # Errors
    ///
    /// As [`read_line`](Self::read_line). Lines discarded before an error
    /// stay discarded.
    pub fn read_until<S, P>(
        &mut self,
        source: &mut S,
        timeout: Duration,
        mut pred: P,
    ) -> Result<Option<Line>, TransportError>
    where
        S: ByteSource + ?Sized,
        P: FnMut(&[u8]) -> bool,
    {
        while let Some(line) = self.read_line(source, timeout)? {
            if pred(&line) {
                return Ok(Some(line));
            }
            tracing::trace!(len = line.len(), "skipping line");
        }
        Ok(None)
    }

    fn check_length(&self, len: usize) -> Result<(), TransportError> {
        match self.options.max_line_length {
            Some(limit) if len > limit => {
                tracing::warn!(limit, len, "dropping overlong line");
                Err(TransportError::LineTooLong { limit })
            }
            _ => Ok(()),
        }
    }

    /// Drops buffered bytes up to and including the `\n` that ends an
    /// overlong line, or all of them if it has not arrived yet.
    fn skip_overlong(&mut self) {
        match self.buf[..self.filled].find_byte(b'\n') {
            Some(at) => {
                self.discard(at + 1);
                self.discarding = false;
                tracing::debug!(buffered = self.filled, "skipped rest of overlong line");
            }
            None => self.discard(self.filled),
        }
    }

    /// Copies out `..content` as a line and compacts everything from
    /// `consumed` on to the front of the buffer.
    fn take(&mut self, content: usize, consumed: usize) -> Line {
        let line = Line::from(&self.buf[..content]);
        self.discard(consumed);
        tracing::trace!(len = line.len(), buffered = self.filled, "line");
        line
    }

    fn discard(&mut self, consumed: usize) {
        self.buf.copy_within(consumed..self.filled, 0);
        self.filled -= consumed;
        self.scanned = 0;
    }

    fn grow(&mut self) -> Result<(), TransportError> {
        let increment = self.options.grow_increment.max(1);
        let requested = self.buf.len().saturating_add(increment);
        self.buf
            .try_reserve_exact(increment)
            .map_err(|_| TransportError::Allocation { requested })?;
        self.buf.resize(requested, 0);
        tracing::debug!(capacity = requested, "grew line buffer");
        Ok(())
    }
}
