//! Byte sources and line framing.
//!
//! A [`ByteSource`] is anything that can fill a buffer within a deadline: a
//! socket with a read timeout, a blocking reader, or a scripted [`Replay`].
//! The [`LineReader`] sits on top of one and yields newline-terminated lines.

mod line_reader;
mod replay;

use std::{
    io::{self, Read},
    net::TcpStream,
    time::Duration,
};

pub use line_reader::LineReader;
pub use replay::{Replay, Step};

/// One line returned by a [`LineReader`], terminator stripped.
///
/// Lines are raw bytes; the peer is not trusted to send UTF-8.
pub type Line = bstr::BString;

/// What a single [`ByteSource::read`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    /// This many bytes were written to the front of the buffer. Never zero.
    Data(usize),
    /// Nothing arrived before the timeout elapsed.
    TimedOut,
    /// The peer closed its side; no further data will come.
    EndOfStream,
}

/// A blocking source of bytes with a per-call timeout.
pub trait ByteSource {
    /// Reads into `buf`, blocking for at most `timeout`.
    ///
    /// # Errors
    ///
    /// Any I/O failure other than a timeout or an orderly close.
    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Chunk>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Chunk> {
        (**self).read(buf, timeout)
    }
}

/// Maps the result of a plain `Read::read` onto a [`Chunk`], retrying
/// `Interrupted`.
fn read_retrying<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<Chunk> {
    loop {
        match reader.read(buf) {
            Ok(0) => return Ok(Chunk::EndOfStream),
            Ok(n) => return Ok(Chunk::Data(n)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                return Ok(Chunk::TimedOut);
            }
            Err(e) => return Err(e),
        }
    }
}

impl ByteSource for TcpStream {
    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Chunk> {
        // A zero timeout would mean "block forever" to the socket layer.
        self.set_read_timeout(Some(timeout.max(Duration::from_millis(1))))?;
        read_retrying(self, buf)
    }
}

/// Adapts any [`Read`] that has no notion of a deadline, such as a file or
/// stdin. The timeout is ignored and reads block until data or EOF.
#[derive(Debug)]
pub struct Blocking<R>(pub R);

impl<R: Read> ByteSource for Blocking<R> {
    fn read(&mut self, buf: &mut [u8], _timeout: Duration) -> io::Result<Chunk> {
        read_retrying(&mut self.0, buf)
    }
}
