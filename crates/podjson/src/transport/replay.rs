use std::{collections::VecDeque, io, time::Duration};

use super::{ByteSource, Chunk};

/// One scripted outcome of a [`Replay`] read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Deliver these bytes. If the caller's buffer is smaller, the rest is
    /// delivered by the following reads.
    Data(Vec<u8>),
    /// Report a timeout.
    Timeout,
    /// Fail with an I/O error of this kind.
    Fail(io::ErrorKind),
}

/// A [`ByteSource`] that plays back a fixed script, then reports end of
/// stream forever.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use podjson::{LineReader, transport::Replay};
///
/// let mut source = Replay::from_chunks(["ab", "c\n"]);
/// let mut reader = LineReader::new();
/// let line = reader.read_line(&mut source, Duration::from_secs(1)).unwrap();
/// assert_eq!(line, Some("abc".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Replay {
    steps: VecDeque<Step>,
}

impl Replay {
    /// A source that plays `steps` in order.
    #[must_use]
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// A source that delivers each chunk on its own read. Empty chunks are
    /// skipped, since a zero-length read means end of stream.
    #[must_use]
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        Self::new(
            chunks
                .into_iter()
                .filter(|c| !c.as_ref().is_empty())
                .map(|c| Step::Data(c.as_ref().to_vec())),
        )
    }

    /// Steps not yet played.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.steps.len()
    }
}

impl ByteSource for Replay {
    fn read(&mut self, buf: &mut [u8], _timeout: Duration) -> io::Result<Chunk> {
        let Some(step) = self.steps.pop_front() else {
            return Ok(Chunk::EndOfStream);
        };
        match step {
            Step::Data(mut bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    bytes.drain(..n);
                    self.steps.push_front(Step::Data(bytes));
                }
                if n == 0 {
                    Ok(Chunk::EndOfStream)
                } else {
                    Ok(Chunk::Data(n))
                }
            }
            Step::Timeout => Ok(Chunk::TimedOut),
            Step::Fail(kind) => Err(kind.into()),
        }
    }
}
